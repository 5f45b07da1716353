//! Tests for line layout - wrapping, overflow and color persistence.

use ansi2pdf_core::api::read_lines;
use ansi2pdf_core::layout::{
    LayoutParams, LineLayout, RenderingContext, Token, expand_tabs, layout_tokens, tokenize,
};
use ansi2pdf_core::model::{Chunk, Color, Line};
use proptest::prelude::*;
use regex::Regex;

fn lay_out(input: &str) -> Vec<Line> {
    read_lines(input.as_bytes(), &LayoutParams::default()).unwrap()
}

// ============================================================================
// Wrapping
// ============================================================================

mod wrap_tests {
    use super::*;

    #[test]
    fn test_short_line_is_one_line() {
        let lines = lay_out("hello\n");
        assert_eq!(lines, vec![Line::new(vec![Chunk::new(Color::BLACK, "hello")], false)]);
    }

    #[test]
    fn test_long_line_wraps_at_eighty() {
        let source = "x".repeat(200);
        let lines = lay_out(&source);
        let widths: Vec<usize> = lines.iter().map(Line::len).collect();
        assert_eq!(widths, vec![80, 80, 40]);
        assert_eq!(
            lines.iter().map(|l| l.overflow).collect::<Vec<_>>(),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_exactly_eighty_is_not_overflow() {
        let lines = lay_out(&"y".repeat(80));
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].overflow);
    }

    #[test]
    fn test_eighty_one_overflows_by_one() {
        let lines = lay_out(&"y".repeat(81));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].overflow);
        assert_eq!(lines[1].text(), "y");
    }

    #[test]
    fn test_blank_source_lines_are_kept() {
        let lines = lay_out("a\n\nb\n");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert!(!lines[1].overflow);
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        let lines = lay_out("one\r\ntwo\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "one");
        assert_eq!(lines[1].text(), "two");
    }

    #[test]
    fn test_last_line_without_terminator() {
        let lines = lay_out("one\ntwo");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = read_lines(&b"ok\xff\n"[..], &LayoutParams::default()).unwrap();
        assert_eq!(lines[0].text(), "ok\u{fffd}");
    }

    #[test]
    fn test_tabs_count_toward_width() {
        let params = LayoutParams::new(10, 8, 55).unwrap();
        let lines = read_lines(&b"\tabcdef"[..], &params).unwrap();
        assert_eq!(lines[0].text(), "        ab");
        assert_eq!(lines[1].text(), "cdef");
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert!(LayoutParams::new(0, 8, 55).is_err());
        let params = LayoutParams {
            line_width: 0,
            ..LayoutParams::default()
        };
        assert!(read_lines(&b"x"[..], &params).is_err());
    }
}

// ============================================================================
// Rendering context
// ============================================================================

mod context_tests {
    use super::*;

    #[test]
    fn test_color_persists_across_source_lines() {
        let lines = lay_out("\x1b[31mred\nnot-reset\n");
        assert_eq!(lines[0].chunks, vec![Chunk::new(Color::RED, "red")]);
        assert_eq!(lines[1].chunks, vec![Chunk::new(Color::RED, "not-reset")]);
    }

    #[test]
    fn test_reset_returns_to_black() {
        let lines = lay_out("\x1b[32mgo\x1b[0m\nplain\n");
        assert_eq!(lines[1].chunks[0].color, Color::BLACK);
    }

    #[test]
    fn test_color_persists_across_wraps() {
        let mut layout = LineLayout::new(LayoutParams::new(4, 8, 55).unwrap());
        let lines = layout.layout("\x1b[34mabcdefgh");
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.chunks.iter().all(|c| c.color == Color::BLUE));
        }
        assert_eq!(layout.context().color, Color::BLUE);
    }

    #[test]
    fn test_directive_at_end_of_line_affects_next_line() {
        let mut ctx = RenderingContext::new();
        let first = layout_tokens(tokenize("a\x1b[33m", 8), &mut ctx, 80);
        assert_eq!(first[0].chunks[0].color, Color::BLACK);
        let second = layout_tokens(tokenize("b", 8), &mut ctx, 80);
        assert_eq!(second[0].chunks[0].color, Color::YELLOW);
    }

    #[test]
    fn test_directives_never_become_chunks() {
        let mut ctx = RenderingContext::new();
        let lines = layout_tokens(
            vec![
                Token::ColorDirective(Color::RED),
                Token::ColorDirective(Color::GREEN),
            ],
            &mut ctx,
            80,
        );
        assert_eq!(lines, vec![Line::default()]);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn source_line() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        4 => "[a-zA-Z0-9 ()]{1,40}",
        1 => Just("\t".to_string()),
        1 => Just("\\".to_string()),
        1 => Just("\x1b[31m".to_string()),
        1 => Just("\x1b[0;32m".to_string()),
        1 => Just("\x1b[0m".to_string()),
        1 => Just("\x1b[K".to_string()),
        1 => Just("\x1b[2J".to_string()),
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

/// Expand each span between escape sequences against the running offset.
fn strip_and_expand(line: &str) -> String {
    let csi = Regex::new(r"\x1b\[[;0-9]*[A-Za-z]").unwrap();
    let mut out = String::new();
    for span in csi.split(line) {
        let offset = out.chars().count();
        out.push_str(&expand_tabs(span, offset, 8));
    }
    out
}

proptest! {
    #[test]
    fn prop_content_is_preserved(line in source_line()) {
        let mut layout = LineLayout::new(LayoutParams::default());
        let text: String = layout.layout(&line).iter().map(Line::text).collect();
        prop_assert_eq!(text, strip_and_expand(&line));
    }

    #[test]
    fn prop_width_is_bounded(line in source_line(), width in 1usize..100) {
        let mut layout = LineLayout::new(LayoutParams::new(width, 8, 55).unwrap());
        let lines = layout.layout(&line);
        prop_assert!(!lines.last().unwrap().overflow);
        for l in &lines {
            prop_assert!(l.len() <= width);
            if l.overflow {
                prop_assert_eq!(l.len(), width);
            }
            prop_assert!(l.chunks.iter().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn prop_layout_is_deterministic(lines in prop::collection::vec(source_line(), 0..8)) {
        let input = lines.join("\n");
        let first = read_lines(input.as_bytes(), &LayoutParams::default()).unwrap();
        let second = read_lines(input.as_bytes(), &LayoutParams::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}
