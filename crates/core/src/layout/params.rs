//! Layout parameters.
//!
//! Contains LayoutParams for controlling wrapping, tab stops and page size.

use crate::error::{ConvertError, Result};

/// Parameters for line layout and pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutParams {
    /// Maximum number of columns on one physical line.
    pub line_width: usize,

    /// Distance between tab stops, in columns.
    pub tab_width: usize,

    /// Number of physical lines on a full page.
    pub lines_per_page: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_width: 80,
            tab_width: 8,
            lines_per_page: 55,
        }
    }
}

impl LayoutParams {
    /// Creates new layout parameters with the specified values.
    ///
    /// # Errors
    /// Returns `InvalidParams` if any value is zero.
    pub fn new(line_width: usize, tab_width: usize, lines_per_page: usize) -> Result<Self> {
        let params = Self {
            line_width,
            tab_width,
            lines_per_page,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that layout can make progress with these values.
    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 {
            return Err(ConvertError::InvalidParams(
                "line width must be at least 1".to_string(),
            ));
        }
        if self.tab_width == 0 {
            return Err(ConvertError::InvalidParams(
                "tab width must be at least 1".to_string(),
            ));
        }
        if self.lines_per_page == 0 {
            return Err(ConvertError::InvalidParams(
                "lines per page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
