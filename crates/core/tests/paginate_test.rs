//! Tests for pagination.

use ansi2pdf_core::layout::{page_counts, paginate};
use ansi2pdf_core::model::{Chunk, Color, Line};

fn numbered_lines(n: usize) -> Vec<Line> {
    (0..n)
        .map(|i| Line::new(vec![Chunk::new(Color::BLACK, i.to_string())], false))
        .collect()
}

#[test]
fn test_exact_multiple_has_no_partial_page() {
    let pages = paginate(numbered_lines(110), 55);
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.len() == 55));
    assert_eq!(page_counts(110, 55), (2, 0));
}

#[test]
fn test_one_over_gives_partial_page() {
    let pages = paginate(numbered_lines(56), 55);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 55);
    assert_eq!(pages[1].len(), 1);
    assert_eq!(pages[1].lines[0].text(), "55");
    assert_eq!(page_counts(56, 55), (1, 1));
}

#[test]
fn test_fewer_lines_than_capacity() {
    let pages = paginate(numbered_lines(3), 55);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 3);
}

#[test]
fn test_no_lines_no_pages() {
    assert!(paginate(Vec::new(), 55).is_empty());
}

#[test]
fn test_pages_are_numbered_and_ordered() {
    let pages = paginate(numbered_lines(7), 3);
    assert_eq!(
        pages.iter().map(|p| p.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    let flattened: Vec<String> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(Line::text))
        .collect();
    assert_eq!(flattened, (0..7).map(|i| i.to_string()).collect::<Vec<_>>());
}
