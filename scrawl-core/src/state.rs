//! # State
//!
//! The annotation data itself: strokes, text, and the canvas which owns them.

pub mod canvas;
pub mod drawing;
pub mod text;

pub use canvas::Canvas;
pub use drawing::{Drawing, DrawingID};
pub use text::{Text, TextID};
