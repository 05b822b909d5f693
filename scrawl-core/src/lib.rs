pub mod color;
pub mod geometry;
pub mod id;
pub mod io;
pub mod labels;
pub mod notify;
pub mod render;
pub mod serialize;
pub mod state;
pub mod tool;
pub mod util;

pub use id::StableID;
