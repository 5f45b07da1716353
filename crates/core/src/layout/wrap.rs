//! Column-bounded line wrapping with a color context that outlives lines.

use std::collections::VecDeque;

use tracing::trace;

use super::params::LayoutParams;
use super::tokenizer::{Token, tokenize};
use crate::model::{Chunk, Color, Line};

/// The current paint state.
///
/// One context lives for a whole document: a color set on one source line
/// stays in effect on the following ones until changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderingContext {
    pub color: Color,
}

impl RenderingContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lay out the tokens of one source line into physical lines.
///
/// Always returns at least one line; the last one has `overflow == false`
/// and may be empty. Color directives update `context` in place.
/// `line_width` must be non-zero.
pub fn layout_tokens(
    tokens: Vec<Token>,
    context: &mut RenderingContext,
    line_width: usize,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut queue: VecDeque<Token> = tokens.into();
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut column = 0;

    while let Some(token) = queue.pop_front() {
        let text = match token {
            Token::ColorDirective(color) => {
                context.color = color;
                continue;
            }
            Token::TextRun(text) => text,
        };
        let len = text.chars().count();
        if len == 0 {
            continue;
        }
        if column + len <= line_width {
            chunks.push(Chunk::new(context.color, text));
            column += len;
            continue;
        }

        // Overflow: fill the line, then retry the rest on a fresh one.
        let room = line_width - column;
        let split = text
            .char_indices()
            .nth(room)
            .map_or(text.len(), |(idx, _)| idx);
        let (head, tail) = text.split_at(split);
        if !head.is_empty() {
            chunks.push(Chunk::new(context.color, head));
        }
        trace!(lines = lines.len(), room, "wrapping overflowing text run");
        lines.push(Line::new(std::mem::take(&mut chunks), true));
        column = 0;
        queue.push_front(Token::TextRun(tail.to_string()));
    }

    lines.push(Line::new(chunks, false));
    lines
}

/// Tokenizes and lays out source lines for one document.
///
/// Owns the document's [`RenderingContext`], so feeding lines through the
/// same `LineLayout` carries color across them.
#[derive(Debug, Clone)]
pub struct LineLayout {
    params: LayoutParams,
    context: RenderingContext,
}

impl LineLayout {
    /// Create a layout session starting in black.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            context: RenderingContext::new(),
        }
    }

    pub fn context(&self) -> &RenderingContext {
        &self.context
    }

    /// Lay out one source line, without its terminator.
    pub fn layout(&mut self, source_line: &str) -> Vec<Line> {
        let tokens = tokenize(source_line, self.params.tab_width);
        layout_tokens(tokens, &mut self.context, self.params.line_width)
    }
}
