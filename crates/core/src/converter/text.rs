//! Text Writer - outputs the laid-out lines as plain text.

use std::io::Write;

use super::DocumentWriter;
use crate::error::{ConvertError, Result};
use crate::model::Page;
use crate::utils::CountingWriter;

/// Plain text writer.
///
/// One output line per physical line, colors dropped, a form feed after
/// each page.
pub struct TextWriter<W: Write> {
    out: CountingWriter<W>,
    started: bool,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: CountingWriter::new(out),
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> DocumentWriter for TextWriter<W> {
    fn begin(&mut self, _page_count: usize) -> Result<()> {
        if self.started {
            return Err(ConvertError::InvalidState {
                state: "STARTED",
                op: "begin document",
            });
        }
        self.started = true;
        Ok(())
    }

    fn write_page(&mut self, page: &Page) -> Result<()> {
        for line in &page.lines {
            writeln!(self.out, "{}", line.text())?;
        }
        self.out.write_all(b"\x0c")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<u64> {
        self.out.flush()?;
        Ok(self.out.count())
    }
}
