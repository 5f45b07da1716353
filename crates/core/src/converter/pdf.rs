//! PDF serializer.
//!
//! Writes a document as a flat run of indirect objects followed by a
//! cross-reference table and trailer:
//!
//! ```text
//! 1            Catalog
//! 2            Pages (kids listed up front)
//! 3, 4         Page 1 and its content stream
//! ...          two objects per page
//! 2n+3         Courier font
//! xref, trailer, startxref, %%EOF
//! ```
//!
//! The byte offset of every object is taken from a counting writer just
//! before its `N 0 obj` line and reproduced verbatim in the xref table.

use std::io::Write;

use tracing::{debug, trace, warn};

use super::DocumentWriter;
use super::setup::PageSetup;
use crate::error::{ConvertError, Result};
use crate::model::{Line, Page};
use crate::utils::{CountingWriter, literal_bytes};

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FIRST_PAGE_ID: u32 = 3;

const FILE_HEADER: &[u8] = b"%PDF-1.4\n";
/// Comment with high-bit bytes so transfer tools treat the file as binary.
const BINARY_MARKER: &[u8] = &[b'%', 226, 227, 239, 243, b'\n'];
const OBJECT_END: &[u8] = b"\nendobj\n";
const FONT_RESOURCE: &str = "F1";
const BASE_FONT: &str = "Courier";

/// Where the serializer is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerState {
    NotStarted,
    HeaderWritten,
    PageOpened,
    LinesEmitted,
    PageClosed,
    ResourcesWritten,
    IndexWritten,
    TrailerWritten,
    Done,
    /// A previous operation failed; the output is corrupt.
    Failed,
}

impl SerializerState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::HeaderWritten => "HEADER_WRITTEN",
            Self::PageOpened => "PAGE_OPENED",
            Self::LinesEmitted => "LINES_EMITTED",
            Self::PageClosed => "PAGE_CLOSED",
            Self::ResourcesWritten => "RESOURCES_WRITTEN",
            Self::IndexWritten => "INDEX_WRITTEN",
            Self::TrailerWritten => "TRAILER_WRITTEN",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }
}

/// Build the content stream payload for one page.
///
/// Every chunk gets its own `rg` before its `Tj`, even when the color did
/// not change; each line ends with `T*`.
pub fn content_stream(page: &Page, setup: &PageSetup) -> Vec<u8> {
    let mut content = ContentStream::default();
    content.begin_text(setup);
    if let Some(header) = setup.header.as_deref() {
        content.header(header);
    }
    for line in &page.lines {
        content.line(line);
    }
    content.end_text();
    content.buf
}

#[derive(Default)]
struct ContentStream {
    buf: Vec<u8>,
}

impl ContentStream {
    fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn show_text(&mut self, text: &str) {
        self.buf.push(b'(');
        self.buf.extend(literal_bytes(text));
        self.push_str(") Tj\n");
    }

    fn begin_text(&mut self, setup: &PageSetup) {
        self.push_str(&format!(
            "BT\n/{} {} Tf\n{} {} Td\n{} TL\n",
            FONT_RESOURCE, setup.font_size, setup.origin_x, setup.origin_y, setup.leading
        ));
    }

    fn header(&mut self, header: &str) {
        self.push_str("0 0 0 rg\n");
        self.show_text(header);
        self.push_str("T*\nT*\n");
    }

    fn line(&mut self, line: &Line) {
        for chunk in &line.chunks {
            self.push_str(&format!("{} rg\n", chunk.color));
            self.show_text(&chunk.text);
        }
        self.push_str("T*\n");
    }

    fn end_text(&mut self) {
        self.push_str("\nET\n");
    }
}

/// Serializes pages into a PDF document.
///
/// Any failure moves the writer to [`SerializerState::Failed`]; the bytes
/// already written must then be discarded.
pub struct PdfWriter<W: Write> {
    out: CountingWriter<W>,
    setup: PageSetup,
    state: SerializerState,
    /// Offset of object `i + 1` at index `i`.
    offsets: Vec<u64>,
    /// Sum of the lengths of everything emitted, kept apart from the counter.
    emitted: u64,
    page_count: usize,
    pages_written: usize,
    xref_offset: Option<u64>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(out: W, setup: PageSetup) -> Self {
        Self {
            out: CountingWriter::new(out),
            setup,
            state: SerializerState::NotStarted,
            offsets: Vec::new(),
            emitted: 0,
            page_count: 0,
            pages_written: 0,
            xref_offset: None,
        }
    }

    pub const fn state(&self) -> SerializerState {
        self.state
    }

    /// Recorded object offsets, object 1 first.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Offset of the `xref` keyword, once the index has been written.
    pub const fn xref_offset(&self) -> Option<u64> {
        self.xref_offset
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn page_object_id(index: usize) -> u32 {
        FIRST_PAGE_ID + 2 * index as u32
    }

    fn font_object_id(&self) -> u32 {
        Self::page_object_id(self.page_count)
    }

    /// Run `op`, poisoning the writer if it fails.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        if result.is_err() {
            self.state = SerializerState::Failed;
        }
        result
    }

    fn expect_state(&self, allowed: &[SerializerState], op: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ConvertError::InvalidState {
                state: self.state.name(),
                op,
            })
        }
    }

    /// Write one indirect object, recording its offset.
    ///
    /// The offset comes from the counting writer and must agree with the
    /// running total of emitted lengths.
    fn write_object(&mut self, objid: u32, body: &[u8]) -> Result<()> {
        debug_assert_eq!(objid as usize, self.offsets.len() + 1);
        let offset = self.out.count();
        if offset != self.emitted {
            return Err(ConvertError::OffsetMismatch {
                objid,
                recorded: offset,
                actual: self.emitted,
            });
        }
        trace!(objid, offset, "writing object");
        self.offsets.push(offset);

        let header = format!("{objid} 0 obj\n");
        self.out.write_all(header.as_bytes())?;
        self.out.write_all(body)?;
        self.out.write_all(OBJECT_END)?;
        self.emitted += (header.len() + body.len() + OBJECT_END.len()) as u64;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.out.write_all(FILE_HEADER)?;
        self.out.write_all(BINARY_MARKER)?;
        self.emitted += (FILE_HEADER.len() + BINARY_MARKER.len()) as u64;
        self.state = SerializerState::HeaderWritten;

        let catalog = format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>");
        self.write_object(CATALOG_ID, catalog.as_bytes())?;

        let kids: Vec<String> = (0..self.page_count)
            .map(|i| format!("{} 0 R", Self::page_object_id(i)))
            .collect();
        let pages = format!(
            "<< /Type /Pages /Count {} /Kids [{}] >>",
            self.page_count,
            kids.join(" ")
        );
        self.write_object(PAGES_ID, pages.as_bytes())
    }

    fn write_page_objects(&mut self, page: &Page) -> Result<()> {
        if self.pages_written >= self.page_count {
            return Err(ConvertError::PageCountMismatch {
                declared: self.page_count,
                written: self.pages_written + 1,
            });
        }
        self.state = SerializerState::PageOpened;
        let content = content_stream(page, &self.setup);
        self.state = SerializerState::LinesEmitted;

        let page_id = Self::page_object_id(self.pages_written);
        let content_id = page_id + 1;
        let (width, height) = self.setup.media_box;
        let page_dict = format!(
            "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {width} {height}] \
             /Contents {content_id} 0 R /Resources << /Font << /{FONT_RESOURCE} {} 0 R >> >> >>",
            self.font_object_id()
        );
        self.write_object(page_id, page_dict.as_bytes())?;

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        self.write_object(content_id, &stream)?;

        self.pages_written += 1;
        self.state = SerializerState::PageClosed;
        debug!(
            page = page.number,
            lines = page.len(),
            content_bytes = content.len(),
            "page written"
        );
        Ok(())
    }

    fn write_resources(&mut self) -> Result<()> {
        if self.pages_written != self.page_count {
            return Err(ConvertError::PageCountMismatch {
                declared: self.page_count,
                written: self.pages_written,
            });
        }
        let font = format!("<< /Type /Font /Subtype /Type1 /BaseFont /{BASE_FONT} >>");
        self.write_object(self.font_object_id(), font.as_bytes())?;
        self.state = SerializerState::ResourcesWritten;
        Ok(())
    }

    fn write_index(&mut self) -> Result<()> {
        let xref_offset = self.out.count();
        let size = self.offsets.len() + 1;
        write!(self.out, "xref\n0 {size}\n0000000000 65535 f \n")?;
        for offset in &self.offsets {
            writeln!(self.out, "{offset:010} 00000 n ")?;
        }
        self.xref_offset = Some(xref_offset);
        self.state = SerializerState::IndexWritten;
        Ok(())
    }

    fn write_trailer(&mut self) -> Result<()> {
        let xref_offset = self.xref_offset.unwrap_or_default();
        write!(
            self.out,
            "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            self.offsets.len() + 1
        )?;
        self.state = SerializerState::TrailerWritten;
        Ok(())
    }
}

impl<W: Write> DocumentWriter for PdfWriter<W> {
    fn begin(&mut self, page_count: usize) -> Result<()> {
        self.guarded(|w| {
            w.expect_state(&[SerializerState::NotStarted], "begin document")?;
            if page_count == 0 {
                warn!("document has no pages");
            }
            w.page_count = page_count;
            w.write_header()
        })
    }

    fn write_page(&mut self, page: &Page) -> Result<()> {
        self.guarded(|w| {
            w.expect_state(
                &[SerializerState::HeaderWritten, SerializerState::PageClosed],
                "write page",
            )?;
            w.write_page_objects(page)
        })
    }

    fn finish(&mut self) -> Result<u64> {
        self.guarded(|w| {
            w.expect_state(
                &[SerializerState::HeaderWritten, SerializerState::PageClosed],
                "finish document",
            )?;
            w.write_resources()?;
            w.write_index()?;
            w.write_trailer()?;
            w.out.flush()?;
            w.state = SerializerState::Done;
            debug!(
                objects = w.offsets.len(),
                bytes = w.out.count(),
                "pdf document finished"
            );
            Ok(w.out.count())
        })
    }
}
