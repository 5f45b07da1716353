//! Reading back generated documents.
//!
//! This module contains:
//! - `xref` - cross-reference table parsing and offset verification

pub mod xref;

pub use xref::{XrefTable, verify_xref};
