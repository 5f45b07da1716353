//! Miscellaneous routines shared by the renderers.
//!
//! - Literal-string escaping for PDF and PostScript `( ... )` strings
//! - Single-byte text encoding for the standard Type 1 fonts
//! - A byte-counting writer used for object offset bookkeeping

use std::borrow::Cow;
use std::io::{self, Write};

/// Escape text for a `( ... )` literal string.
///
/// Backslash and both parentheses get a backslash prefix; newline, carriage
/// return, tab, form feed and backspace become their two-character escapes.
/// Borrows when there is nothing to escape.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '\x08' => out.push_str("\\b"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

const fn needs_escape(ch: char) -> bool {
    matches!(ch, '\\' | '(' | ')' | '\n' | '\r' | '\t' | '\x0c' | '\x08')
}

/// Encode text one byte per char for a single-byte font.
///
/// Chars up to U+00FF keep their code; anything wider becomes `?`.
pub fn encode_single_byte(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}

/// Escape and encode text ready to sit between `(` and `)`.
pub fn literal_bytes(text: &str) -> Vec<u8> {
    encode_single_byte(&escape_literal(text))
}

/// A writer that counts every byte passed to the inner writer.
///
/// The count is the offset at which the next byte will land, which is what
/// the PDF cross-reference table records for each object.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes written so far.
    pub const fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
