//! Laid-out text: chunks on physical lines, lines grouped into pages.

use super::color::Color;

/// A single-colored, non-empty run of text placed on one physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub color: Color,
    pub text: String,
}

impl Chunk {
    pub fn new(color: Color, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }

    /// Width of the chunk in columns.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One physical output line.
///
/// `overflow` is set when the line was cut at the width limit and the
/// rest of the same source line continues on the next `Line`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub chunks: Vec<Chunk>,
    pub overflow: bool,
}

impl Line {
    pub fn new(chunks: Vec<Chunk>, overflow: bool) -> Self {
        Self { chunks, overflow }
    }

    /// Total width of all chunks in columns.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The visible text of the line with color information dropped.
    pub fn text(&self) -> String {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }
}

/// A fixed-capacity group of lines rendered on one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub lines: Vec<Line>,
}

impl Page {
    pub fn new(number: usize, lines: Vec<Line>) -> Self {
        Self { number, lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
