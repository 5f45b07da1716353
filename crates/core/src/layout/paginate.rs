//! Groups the laid-out lines of a whole document into pages.

use crate::model::{Line, Page};

/// Split `lines` into pages of `lines_per_page` lines.
///
/// Every page but the last is full. The last page holds the remainder and
/// is only created when there is one, so an empty input gives no pages.
/// `lines_per_page` must be non-zero.
pub fn paginate(lines: Vec<Line>, lines_per_page: usize) -> Vec<Page> {
    let mut pages = Vec::with_capacity(lines.len().div_ceil(lines_per_page));
    let mut rest = lines.into_iter().peekable();
    while rest.peek().is_some() {
        let page_lines: Vec<Line> = rest.by_ref().take(lines_per_page).collect();
        pages.push(Page::new(pages.len() + 1, page_lines));
    }
    pages
}

/// Number of full pages and size of the trailing partial page.
pub fn page_counts(total_lines: usize, lines_per_page: usize) -> (usize, usize) {
    (total_lines / lines_per_page, total_lines % lines_per_page)
}
