//! # Render
//!
//! What a renderer needs to paint a canvas at some surface size, with culled strokes left out and
//! every normalized coordinate resolved to surface pixels. Commands are in paint order, bottom to top.

use crate::color::Color;
use crate::geometry::{Path, Point, Size};
use crate::state::{Canvas, DrawingID, TextID};
use crate::tool::{ToolGeometryError, LINE_WIDTH_REFERENCE};

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub id: DrawingID,
    pub path: Path,
    pub line_width: f32,
    pub color: Color,
    /// Stroke the path with the eraser, clearing what is beneath instead of painting over it.
    pub erase: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextCommand {
    pub id: TextID,
    pub value: String,
    /// Top-left corner.
    pub origin: Point,
    pub font_size: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    pub size: Size,
    pub drawings: Vec<DrawCommand>,
    /// Painted after, and so above, every drawing.
    pub text: Vec<TextCommand>,
}
impl DrawList {
    /// Resolve the canvas as of its last culling pass.
    ///
    /// Strokes too short to have a shape are skipped.
    /// # Errors
    /// If a visible stroke does not lay out at this size.
    pub fn for_canvas(canvas: &Canvas, size: Size) -> Result<Self, ToolGeometryError> {
        let mut drawings = Vec::with_capacity(canvas.all_drawings().len());
        for drawing in canvas.visible_drawings() {
            let Some(path) = drawing.create_path(size)? else {
                continue;
            };
            drawings.push(DrawCommand {
                id: drawing.id(),
                path,
                line_width: drawing.tool.line_width(size),
                color: drawing.tool.color(),
                erase: drawing.tool.is_eraser(),
            });
        }
        let text = canvas
            .all_text()
            .iter()
            .map(|text| TextCommand {
                id: text.id(),
                value: text.value.clone(),
                origin: text.location.scaled(size),
                font_size: text.font_size.get() * size.width / LINE_WIDTH_REFERENCE,
                color: text.color,
            })
            .collect();
        Ok(Self {
            size,
            drawings,
            text,
        })
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty() && self.text.is_empty()
    }
    /// How many commands clear instead of paint.
    #[must_use]
    pub fn erase_count(&self) -> usize {
        self.drawings.iter().filter(|command| command.erase).count()
    }
}
