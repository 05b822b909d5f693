//! # IO
//!
//! Canvases are stored as their [`Record`](crate::serialize::Record), written out as JSON text.
//! Reading is as lenient as [`Canvas::construct_with_diagnostics`]: broken strokes or text are
//! dropped and reported, while a broken canvas fails with [`IOErrorKind::InvalidData`].

use std::io::{Error as IOError, ErrorKind as IOErrorKind, Read, Result as IOResult, Write};

use crate::serialize::{DecodeDiagnostic, Serializable};
use crate::state::Canvas;

/// Write `canvas` as a JSON document.
/// # Errors
/// Errors from the writer, or [`IOErrorKind::InvalidInput`] if the canvas holds a value JSON
/// cannot carry.
pub fn write_canvas(canvas: &Canvas, mut writer: impl Write) -> IOResult<()> {
    let record = canvas
        .serialize()
        .map_err(|e| IOError::new(IOErrorKind::InvalidInput, e))?;
    serde_json::to_writer_pretty(&mut writer, &record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Read a canvas written by [`write_canvas`], along with whatever was dropped while decoding it.
/// # Errors
/// Errors from the reader. [`IOErrorKind::InvalidData`] if the text is not JSON, the root is not a
/// record, or the canvas' own fields are missing.
pub fn read_canvas(reader: impl Read) -> IOResult<(Canvas, Vec<DecodeDiagnostic>)> {
    let root: serde_json::Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            IOError::from(e)
        } else {
            // Including EOF, which here means truncated text rather than a short read.
            IOError::new(IOErrorKind::InvalidData, e)
        }
    })?;
    let record = root
        .as_object()
        .ok_or_else(|| IOError::new(IOErrorKind::InvalidData, "root is not a record"))?;
    Canvas::construct_with_diagnostics(record)
        .map_err(|e| IOError::new(IOErrorKind::InvalidData, e))
}

/// # Errors
/// See [`read_canvas`], plus failure to open `path`.
pub fn read_path(
    path: impl AsRef<std::path::Path>,
) -> IOResult<(Canvas, Vec<DecodeDiagnostic>)> {
    let file = std::fs::File::open(path)?;
    read_canvas(std::io::BufReader::new(file))
}

/// Create or truncate `path`, and write `canvas` into it.
/// # Errors
/// See [`write_canvas`], plus failure to create `path`.
pub fn write_path(canvas: &Canvas, path: impl AsRef<std::path::Path>) -> IOResult<()> {
    let file = std::fs::File::create(path)?;
    write_canvas(canvas, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        color::Color,
        geometry::Point,
        state::{Drawing, Text},
        tool::{Tool, ToolKind},
        util::FiniteF32,
    };

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(5);
        canvas.add_drawing(Drawing::new(
            Tool::new(ToolKind::Arrow, FiniteF32::new(3.0).unwrap(), Color::WHITE)
                .with_points([Point::new(0.125, 0.25), Point::new(0.5, 0.75)]),
        ));
        canvas.add_text(Text::new("hello\nworld", Point::new(0.5, 0.5)));
        canvas
    }
    fn kind_of(result: IOResult<(Canvas, Vec<DecodeDiagnostic>)>) -> IOErrorKind {
        result.err().map(|e| e.kind()).unwrap()
    }

    #[test]
    fn stream_round_trip() {
        let canvas = canvas();
        let mut bytes = Vec::new();
        write_canvas(&canvas, &mut bytes).unwrap();

        let (back, diagnostics) = read_canvas(bytes.as_slice()).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(back.index(), 5);
        assert_eq!(back.all_drawings(), canvas.all_drawings());
        assert_eq!(back.all_text(), canvas.all_text());
    }
    #[test]
    fn not_json() {
        assert_eq!(kind_of(read_canvas(&b"canvas, please"[..])), IOErrorKind::InvalidData);
        // Truncated.
        assert_eq!(kind_of(read_canvas(&b"{\"index\": "[..])), IOErrorKind::InvalidData);
    }
    #[test]
    fn root_must_be_record() {
        assert_eq!(kind_of(read_canvas(&b"[1, 2, 3]"[..])), IOErrorKind::InvalidData);
    }
    #[test]
    fn canvas_fields_required() {
        assert_eq!(
            kind_of(read_canvas(&b"{\"_type\": \"canvas\"}"[..])),
            IOErrorKind::InvalidData
        );
        assert_eq!(
            kind_of(read_canvas(&b"{\"_type\": \"text\", \"index\": 0}"[..])),
            IOErrorKind::InvalidData
        );
    }
    #[test]
    fn reports_dropped_children() {
        let text = br#"{"_type": "canvas", "index": 0, "drawings": [{"_type": "drawing"}]}"#;
        let (canvas, diagnostics) = read_canvas(&text[..]).unwrap();
        assert!(canvas.all_drawings().is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].list, "drawings");
    }
    #[test]
    fn unwritable_canvas() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(Drawing::new(
            Tool::new(ToolKind::Pen, FiniteF32::ONE, Color::BLACK)
                .with_points([Point::new(f32::NAN, 0.0)]),
        ));
        let mut bytes = Vec::new();
        assert_eq!(
            write_canvas(&canvas, &mut bytes).err().map(|e| e.kind()),
            Some(IOErrorKind::InvalidInput)
        );
        assert!(bytes.is_empty());
    }
    #[test]
    fn path_round_trip() {
        let path = std::env::temp_dir().join(format!("scrawl-io-{}.json", uuid::Uuid::new_v4()));
        let canvas = canvas();
        write_path(&canvas, &path).unwrap();
        let result = read_path(&path);
        let _ = std::fs::remove_file(&path);

        let (back, _) = result.unwrap();
        assert_eq!(back.all_text(), canvas.all_text());
        assert_eq!(
            read_path(&path).err().map(|e| e.kind()),
            Some(IOErrorKind::NotFound)
        );
    }
}
