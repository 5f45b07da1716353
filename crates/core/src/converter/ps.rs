//! PostScript renderer.
//!
//! Produces a print stream for the same pages the PDF writer consumes.
//! Unlike the PDF output, overflowing lines end with a black ` ...` marker.

use std::io::Write;

use tracing::debug;

use super::DocumentWriter;
use crate::error::{ConvertError, Result};
use crate::model::{Line, Page};
use crate::utils::{CountingWriter, literal_bytes};

const LEFT_MARGIN: u32 = 72;
const TOP_BASELINE: u32 = 700;
const LINE_ADVANCE: u32 = 12;
const FONT_SIZE: u32 = 9;
const HEADER_FONT_SIZE: u32 = 14;
/// Distance of the header baseline below the top edge.
const HEADER_DROP: u32 = 60;
const CONTINUATION_MARKER: &str = " ...";

/// Renders pages as PostScript.
pub struct PsWriter<W: Write> {
    out: CountingWriter<W>,
    header: Option<String>,
    page_count: Option<usize>,
    pages_written: usize,
    finished: bool,
}

impl<W: Write> PsWriter<W> {
    pub fn new(out: W, header: Option<String>) -> Self {
        Self {
            out: CountingWriter::new(out),
            header: header.filter(|h| !h.trim().is_empty()),
            page_count: None,
            pages_written: 0,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_show(&mut self, text: &str) -> Result<()> {
        self.out.write_all(b"(")?;
        self.out.write_all(&literal_bytes(text))?;
        self.out.write_all(b") show\n")?;
        Ok(())
    }

    /// Centre the header near the top edge, leaving the body font intact.
    fn write_header(&mut self, header: &str) -> Result<()> {
        writeln!(self.out, "gsave")?;
        writeln!(
            self.out,
            "/Helvetica-Bold findfont {HEADER_FONT_SIZE} scalefont setfont"
        )?;
        self.out.write_all(b"/headertext (")?;
        self.out.write_all(&literal_bytes(header))?;
        self.out.write_all(b") def\n")?;
        writeln!(self.out, "currentpagedevice /PageSize get aload pop")?;
        writeln!(self.out, "/PageHeight exch def")?;
        writeln!(self.out, "/PageWidth exch def")?;
        writeln!(self.out, "headertext stringwidth pop")?;
        writeln!(self.out, "PageWidth exch sub 2 div")?;
        writeln!(self.out, "PageHeight {HEADER_DROP} sub moveto")?;
        writeln!(self.out, "headertext show")?;
        writeln!(self.out, "grestore")?;
        Ok(())
    }

    fn write_line(&mut self, line: &Line, index: u32) -> Result<()> {
        for chunk in &line.chunks {
            writeln!(self.out, "{} setrgbcolor", chunk.color)?;
            self.write_show(&chunk.text)?;
        }
        if line.overflow {
            writeln!(self.out, "0 0 0 setrgbcolor")?;
            self.write_show(CONTINUATION_MARKER)?;
        }
        let y = i64::from(TOP_BASELINE) - i64::from((index + 1) * LINE_ADVANCE);
        writeln!(self.out, "{LEFT_MARGIN} {y} moveto")?;
        Ok(())
    }
}

impl<W: Write> DocumentWriter for PsWriter<W> {
    fn begin(&mut self, page_count: usize) -> Result<()> {
        if self.page_count.is_some() {
            return Err(ConvertError::InvalidState {
                state: "STARTED",
                op: "begin document",
            });
        }
        self.page_count = Some(page_count);
        writeln!(self.out, "%!PS-Adobe-3.0")?;
        writeln!(self.out, "%%Pages: {page_count}")?;
        writeln!(self.out, "/Courier findfont {FONT_SIZE} scalefont setfont")?;
        Ok(())
    }

    fn write_page(&mut self, page: &Page) -> Result<()> {
        let Some(declared) = self.page_count.filter(|_| !self.finished) else {
            return Err(ConvertError::InvalidState {
                state: if self.finished { "DONE" } else { "NOT_STARTED" },
                op: "write page",
            });
        };
        if self.pages_written >= declared {
            return Err(ConvertError::PageCountMismatch {
                declared,
                written: self.pages_written + 1,
            });
        }

        let number = self.pages_written + 1;
        writeln!(self.out, "%%Page: {number} {number}")?;
        writeln!(self.out, "newpath")?;
        if let Some(header) = self.header.clone() {
            self.write_header(&header)?;
        }
        writeln!(self.out, "{LEFT_MARGIN} {TOP_BASELINE} moveto")?;
        for (index, line) in page.lines.iter().enumerate() {
            self.write_line(line, index as u32)?;
        }
        writeln!(self.out, "showpage")?;
        self.pages_written = number;
        debug!(page = page.number, lines = page.len(), "postscript page written");
        Ok(())
    }

    fn finish(&mut self) -> Result<u64> {
        let Some(declared) = self.page_count.filter(|_| !self.finished) else {
            return Err(ConvertError::InvalidState {
                state: if self.finished { "DONE" } else { "NOT_STARTED" },
                op: "finish document",
            });
        };
        if self.pages_written != declared {
            return Err(ConvertError::PageCountMismatch {
                declared,
                written: self.pages_written,
            });
        }
        writeln!(self.out, "%%EOF")?;
        self.out.flush()?;
        self.finished = true;
        Ok(self.out.count())
    }
}
