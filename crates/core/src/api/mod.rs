//! High-level API module for ANSI text conversion.
//!
//! # Example
//!
//! ```no_run
//! use ansi2pdf_core::api::{ConvertOptions, convert_to_path};
//!
//! let input = std::io::stdin().lock();
//! let stats = convert_to_path(input, "build.pdf".as_ref(), &ConvertOptions::default())?;
//! println!("{} pages", stats.pages);
//! # Ok::<(), ansi2pdf_core::ConvertError>(())
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{ConvertOptions, ConvertStats, convert, convert_to_path, read_lines};
