//! Text layout: tokenizing, tab expansion, wrapping and pagination.
//!
//! Data flows through this module in one direction:
//! source line -> [`tokenize`] -> [`Token`]s -> [`layout_tokens`] -> [`Line`]s
//! -> [`paginate`] -> [`Page`]s.
//!
//! [`Line`]: crate::model::Line
//! [`Page`]: crate::model::Page

pub mod paginate;
pub mod params;
pub mod tokenizer;
pub mod wrap;

pub use paginate::{page_counts, paginate};
pub use params::LayoutParams;
pub use tokenizer::{Token, classify_sequence, expand_tabs, tokenize};
pub use wrap::{LineLayout, RenderingContext, layout_tokens};
