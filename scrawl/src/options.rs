//! Command line options.

use clap::Parser;
use scrawl_core::geometry::Size;

/// Surface the draw list is resolved against when `--size` isn't given.
pub const DEFAULT_SIZE: Size = Size::new(1000.0, 1000.0);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("expected a size like 1920x1080, found {0:?}")]
pub struct BadSize(String);

#[derive(Parser, Debug, PartialEq)]
#[command(name = "scrawl", about = "Cull annotation canvases and report what a renderer would draw")]
pub struct Options {
    /// Undo the most recent stroke of each canvas before reporting.
    #[arg(long)]
    pub undo: bool,
    /// Write each canvas back to its path after culling.
    #[arg(long)]
    pub write: bool,
    /// Surface size the draw list is laid out at, as WIDTHxHEIGHT.
    #[arg(long, value_name = "WxH", default_value = "1000x1000", value_parser = parse_size)]
    pub size: Size,
    /// Canvas files to process.
    pub paths: Vec<std::path::PathBuf>,
}

/// `WxH`, both positive and finite.
fn parse_size(text: &str) -> Result<Size, BadSize> {
    let bad = || BadSize(text.to_owned());
    let (width, height) = text
        .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
        .ok_or_else(bad)?;
    let width: f32 = width.trim().parse().map_err(|_| bad())?;
    let height: f32 = height.trim().parse().map_err(|_| bad())?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(bad());
    }
    Ok(Size::new(width, height))
}
