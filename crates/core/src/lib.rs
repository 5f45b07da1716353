//! ansi2pdf - typesets ANSI-colored terminal output as PDF or PostScript.
//!
//! Source lines are tokenized into text runs and color directives, wrapped
//! at a fixed column width, grouped into pages, and rendered by one of the
//! [`converter`] writers.

pub mod api;
pub mod converter;
pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{ConvertError, Result};
