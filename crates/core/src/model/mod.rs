//! Document model types - colors and the laid-out text they paint.
//!
//! This module contains the data model shared by layout and every renderer:
//! - `color` - RGB color values and the named terminal palette
//! - `document` - Chunks, Lines and Pages produced by layout

pub mod color;
pub mod document;

// Re-export main types for convenience
pub use color::Color;
pub use document::{Chunk, Line, Page};
