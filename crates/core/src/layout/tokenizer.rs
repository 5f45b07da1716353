//! Splits a source line into visible text runs and color directives.
//!
//! Only the CSI form `ESC [ (digits|;)* letter` is recognized. Anything
//! else, including a lone ESC, stays in the text as a literal character.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Color;

/// CSI escape sequence: ESC, `[`, parameters, one final letter.
static CSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[;0-9]*[A-Za-z]").expect("valid CSI regex"));

/// Erase-to-end-of-line. Cursor control only, so it leaves no token.
const ERASE_TO_EOL: &str = "\x1b[K";

/// Color-setting sequences that map to something other than black.
///
/// Bold and reset-prefixed forms collapse onto the plain color; style
/// information is not carried.
const COLOR_SEQUENCES: &[(&str, Color)] = &[
    ("\x1b[31m", Color::RED),
    ("\x1b[0;31m", Color::RED),
    ("\x1b[01;31m", Color::RED),
    ("\x1b[32m", Color::GREEN),
    ("\x1b[0;32m", Color::GREEN),
    ("\x1b[34m", Color::BLUE),
    ("\x1b[0;34m", Color::BLUE),
    ("\x1b[33m", Color::YELLOW),
    ("\x1b[1;33m", Color::YELLOW),
];

/// A lexical unit of one source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Visible text, tabs already expanded.
    TextRun(String),
    /// Invisible color change applying to all following text.
    ColorDirective(Color),
}

impl Token {
    /// Width in columns. Directives take no space.
    pub fn len(&self) -> usize {
        match self {
            Token::TextRun(text) => text.chars().count(),
            Token::ColorDirective(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map a matched CSI sequence to the color it selects.
///
/// Unknown sequences (including `ESC[0m`) select black.
pub fn classify_sequence(sequence: &str) -> Color {
    COLOR_SEQUENCES
        .iter()
        .find(|(seq, _)| *seq == sequence)
        .map(|(_, color)| *color)
        .unwrap_or(Color::BLACK)
}

/// Replace tabs with spaces up to the next tab stop.
///
/// `offset` is the column at which `input` starts. A char's column is
/// `offset` plus its index in `input`; inserted spaces do not move later
/// tabs within the same span.
pub fn expand_tabs(input: &str, offset: usize, tab_width: usize) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, ch) in input.chars().enumerate() {
        if ch == '\t' {
            let spaces = tab_width - (offset + index) % tab_width;
            out.extend(std::iter::repeat_n(' ', spaces));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Tokenize one source line (without its terminator).
///
/// Empty text runs are never emitted. `tab_width` must be non-zero;
/// [`LayoutParams`](super::LayoutParams) guarantees that.
pub fn tokenize(line: &str, tab_width: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut last_end = 0;

    for m in CSI_RE.find_iter(line) {
        push_text(&mut tokens, &line[last_end..m.start()], &mut offset, tab_width);
        if m.as_str() != ERASE_TO_EOL {
            tokens.push(Token::ColorDirective(classify_sequence(m.as_str())));
        }
        last_end = m.end();
    }
    push_text(&mut tokens, &line[last_end..], &mut offset, tab_width);

    tokens
}

fn push_text(tokens: &mut Vec<Token>, span: &str, offset: &mut usize, tab_width: usize) {
    if span.is_empty() {
        return;
    }
    let expanded = expand_tabs(span, *offset, tab_width);
    *offset += expanded.chars().count();
    tokens.push(Token::TextRun(expanded));
}
