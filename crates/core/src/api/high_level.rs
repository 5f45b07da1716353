//! High-level conversion API.
//!
//! Provides the main entry points:
//! - `read_lines()` - lay out a whole text stream into physical lines
//! - `convert()` - lay out, paginate and render to any writer
//! - `convert_to_path()` - the same, published atomically to a file

use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::converter::{OutputFormat, PageSetup, document_writer};
use crate::document::verify_xref;
use crate::error::Result;
use crate::layout::{LayoutParams, LineLayout, page_counts, paginate};
use crate::model::Line;

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvertOptions {
    /// Wrapping, tab and page capacity settings.
    pub layout: LayoutParams,

    /// PDF page geometry and header text.
    pub page: PageSetup,

    /// Renderer to use.
    pub format: OutputFormat,
}

/// What a conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertStats {
    /// Lines read from the input.
    pub source_lines: usize,
    /// Physical lines after wrapping.
    pub lines: usize,
    /// Pages rendered.
    pub pages: usize,
    /// Bytes written to the destination.
    pub bytes: u64,
}

/// Read `reader` to the end and lay out every line.
///
/// Lines may end in `\n` or `\r\n`; invalid UTF-8 is replaced rather than
/// rejected. One color context spans the whole stream.
///
/// # Errors
/// Returns `InvalidParams` for unusable `params` and `Io` if reading fails.
pub fn read_lines<R: BufRead>(reader: R, params: &LayoutParams) -> Result<Vec<Line>> {
    layout_reader(reader, params).map(|(lines, _)| lines)
}

fn layout_reader<R: BufRead>(mut reader: R, params: &LayoutParams) -> Result<(Vec<Line>, usize)> {
    params.validate()?;
    let mut layout = LineLayout::new(params.clone());
    let mut lines = Vec::new();
    let mut source_lines = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let source = String::from_utf8_lossy(&buf);
        lines.extend(layout.layout(&source));
        source_lines += 1;
    }

    debug!(source_lines, lines = lines.len(), "input laid out");
    Ok((lines, source_lines))
}

/// Convert ANSI text from `reader` into a document written to `writer`.
///
/// The whole input is buffered before anything is written, since the page
/// count must be known up front.
///
/// # Errors
/// Any read or write failure aborts the run; whatever reached `writer` by
/// then is not a valid document.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    options: &ConvertOptions,
) -> Result<ConvertStats> {
    options.page.validate()?;
    let (lines, source_lines) = layout_reader(reader, &options.layout)?;
    let line_count = lines.len();
    let (full, partial) = page_counts(line_count, options.layout.lines_per_page);
    debug!(full_pages = full, partial_lines = partial, "paginating");
    let pages = paginate(lines, options.layout.lines_per_page);

    let mut renderer = document_writer(options.format, writer, &options.page);
    let bytes = renderer.write_document(&pages)?;

    let stats = ConvertStats {
        source_lines,
        lines: line_count,
        pages: pages.len(),
        bytes,
    };
    info!(
        source_lines = stats.source_lines,
        lines = stats.lines,
        pages = stats.pages,
        bytes = stats.bytes,
        format = ?options.format,
        "conversion finished"
    );
    Ok(stats)
}

/// Convert into the file at `path`, replacing it only on success.
///
/// The document is written to a temporary file next to `path`, checked
/// (for PDF, every xref offset is re-read), then renamed over `path`. On
/// any failure the temporary file is removed and `path` is left untouched.
///
/// # Errors
/// As for [`convert`], plus `Xref` if the written PDF fails verification.
pub fn convert_to_path<R: BufRead>(
    reader: R,
    path: &Path,
    options: &ConvertOptions,
) -> Result<ConvertStats> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    let stats = {
        let writer = BufWriter::new(tmp.as_file_mut());
        convert(reader, writer, options)?
    };
    tmp.as_file().sync_all()?;

    if options.format == OutputFormat::Pdf {
        let written = std::fs::read(tmp.path())?;
        let table = verify_xref(&written)?;
        debug!(objects = table.size, "written document verified");
    }

    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), "document published");
    Ok(stats)
}
