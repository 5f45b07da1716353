//! Page geometry and output selection.

use crate::error::{ConvertError, Result};

/// Which renderer produces the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    PostScript,
    Text,
}

impl OutputFormat {
    /// Guess the format from an output file name.
    pub fn from_extension(path: &str) -> Option<Self> {
        let lower = path.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".ps") {
            Some(Self::PostScript)
        } else if lower.ends_with(".txt") {
            Some(Self::Text)
        } else {
            None
        }
    }
}

/// Geometry of a PDF page and its text block, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Font size for the `Tf` operator.
    pub font_size: f32,
    /// Baseline-to-baseline distance for the `TL` operator.
    pub leading: f32,
    /// Left edge of the text block.
    pub origin_x: f32,
    /// Baseline of the first line.
    pub origin_y: f32,
    /// Page width and height (US Letter by default).
    pub media_box: (f32, f32),
    /// Text drawn at the top of every page.
    pub header: Option<String>,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            leading: 10.0,
            origin_x: 40.0,
            origin_y: 750.0,
            media_box: (612.0, 792.0),
            header: None,
        }
    }
}

impl PageSetup {
    /// Default geometry with the given header.
    pub fn with_header(header: Option<String>) -> Self {
        Self {
            header: header.filter(|h| !h.is_empty()),
            ..Self::default()
        }
    }

    /// Check that the geometry describes a drawable page.
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size > 0.0) {
            return Err(ConvertError::InvalidParams(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.leading > 0.0) {
            return Err(ConvertError::InvalidParams(format!(
                "leading must be positive, got {}",
                self.leading
            )));
        }
        let (width, height) = self.media_box;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConvertError::InvalidParams(format!(
                "media box must be positive, got {width}x{height}"
            )));
        }
        Ok(())
    }
}
