//! Output renderers for laid-out pages.
//!
//! Every renderer implements [`DocumentWriter`]:
//! - PdfWriter: self-indexed PDF with a cross-reference table
//! - PsWriter: PostScript print stream
//! - TextWriter: plain text dump of the layout

mod pdf;
mod ps;
mod setup;
mod text;

use std::io::Write;

pub use pdf::{PdfWriter, SerializerState, content_stream};
pub use ps::PsWriter;
pub use setup::{OutputFormat, PageSetup};
pub use text::TextWriter;

use crate::error::Result;
use crate::model::Page;

/// A sink that renders a whole document, one page at a time.
///
/// Calls must come in the order `begin`, `write_page` once per declared
/// page, `finish`. Writers reject anything else.
pub trait DocumentWriter {
    /// Start the document. `page_count` is the number of pages that follow.
    fn begin(&mut self, page_count: usize) -> Result<()>;

    /// Render the next page.
    fn write_page(&mut self, page: &Page) -> Result<()>;

    /// Write any trailing sections and flush. Returns total bytes written.
    fn finish(&mut self) -> Result<u64>;

    /// Render `pages` as a complete document.
    fn write_document(&mut self, pages: &[Page]) -> Result<u64> {
        self.begin(pages.len())?;
        for page in pages {
            self.write_page(page)?;
        }
        self.finish()
    }
}

/// Build the renderer for `format` on top of `out`.
pub fn document_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
    setup: &PageSetup,
) -> Box<dyn DocumentWriter + 'a> {
    match format {
        OutputFormat::Pdf => Box::new(PdfWriter::new(out, setup.clone())),
        OutputFormat::PostScript => Box::new(PsWriter::new(out, setup.header.clone())),
        OutputFormat::Text => Box::new(TextWriter::new(out)),
    }
}
