//! Rendering module for turning extracted content into output formats.

mod json;
mod summary;

pub use json::{to_json, JsonFormat};
pub use summary::to_summary;
