#![warn(clippy::pedantic)]

mod options;

use anyhow::Result as AnyResult;
use scrawl_core::{
    notify::Event,
    render::DrawList,
    state::Canvas,
};

/// Everything reported about one canvas file.
struct Report {
    index: i64,
    strokes: usize,
    culled: usize,
    drawn: usize,
    erasing: usize,
    text: usize,
    dropped: usize,
    undone: Option<String>,
    next_undo: String,
}
impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "canvas {}: {} strokes, {} culled, {} drawn ({} erasing), {} text",
            self.index, self.strokes, self.culled, self.drawn, self.erasing, self.text
        )?;
        if self.dropped != 0 {
            write!(f, ", {} dropped while loading", self.dropped)?;
        }
        if let Some(undone) = &self.undone {
            write!(f, ", did \"{undone}\"")?;
        }
        write!(f, ", next \"{}\"", self.next_undo)
    }
}

fn process(path: &std::path::Path, options: &options::Options) -> AnyResult<Report> {
    let (mut canvas, diagnostics): (Canvas, _) = scrawl_core::io::read_path(path)?;
    for diagnostic in &diagnostics {
        log::warn!("{path:?}: dropped {diagnostic}");
    }
    let _ = canvas.notifier().subscribe(move |event: &Event| {
        log::debug!(
            "canvas {} posted {}: {}",
            event.source(),
            event.name(),
            event.info().unwrap_or_default()
        );
    });

    canvas.perform_occlusion_culling()?;
    let undone = if options.undo {
        let undone = canvas.undo()?;
        // This thread is the main context for the canvas it owns.
        canvas.notifier().pump_main();
        Some(undone)
    } else {
        None
    };
    if options.write {
        scrawl_core::io::write_path(&canvas, path)?;
    }

    let list = DrawList::for_canvas(&canvas, options.size)?;
    Ok(Report {
        index: canvas.index(),
        strokes: canvas.all_drawings().len(),
        culled: canvas.all_drawings().iter().filter(|d| d.is_culled).count(),
        drawn: list.drawings.len(),
        erasing: list.erase_count(),
        text: list.text.len(),
        dropped: diagnostics.len(),
        undone,
        next_undo: canvas.localized_next_undo_name(),
    })
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    // Exits with usage on bad arguments or --help.
    let options = <options::Options as clap::Parser>::parse();

    let results: Vec<_> = {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        options
            .paths
            .par_iter()
            .map(|path| (path, process(path, &options)))
            .collect()
    };
    // No paths is a success.
    let mut had_success = results.is_empty();
    for (path, result) in results {
        match result {
            Ok(report) => {
                had_success = true;
                println!("{}: {report}", path.display());
            }
            Err(e) => log::error!("failed to process {path:?}: {e:#}"),
        }
    }

    // An existing file is left alone.
    match scrawl_core::labels::Labels::get().save_if_missing() {
        Ok(true) => log::info!("Wrote default label config"),
        Ok(false) => (),
        Err(e) => log::warn!("Failed to save label config:\n{e:?}"),
    }

    if had_success {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Failed to process any provided canvas."))
    }
}
