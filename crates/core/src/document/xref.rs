//! Cross-reference table verification.
//!
//! Reads the `startxref` pointer, parses the classic xref table it points
//! at, and checks that every in-use entry lands on `<objid> 0 obj`.

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Fixed width of one xref entry: `oooooooooo ggggg n \n`.
const ENTRY_LEN: usize = 20;

/// A parsed single-section cross-reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefTable {
    /// Byte offset of the `xref` keyword.
    pub start: usize,
    /// Object count including the free-list head.
    pub size: usize,
    /// Offset of object `i + 1` at index `i`.
    pub offsets: Vec<usize>,
}

fn xref_error(msg: impl Into<String>) -> ConvertError {
    ConvertError::Xref(msg.into())
}

/// Find the `startxref` position by scanning backwards from end of file.
fn find_startxref(data: &[u8]) -> Result<usize> {
    let search = b"startxref";
    let Some(i) = data.windows(search.len()).rposition(|w| w == search) else {
        return Err(xref_error("startxref not found"));
    };

    let rest = &data[i + search.len()..];
    let pos = rest
        .iter()
        .position(|b| !matches!(b, b' ' | b'\n' | b'\r'))
        .unwrap_or(rest.len());
    parse_number(&rest[pos..]).map(|(n, _)| n)
}

/// Parse a leading decimal number, returning it and the bytes consumed.
fn parse_number(data: &[u8]) -> Result<(usize, usize)> {
    let end = data
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(data.len());
    if end == 0 {
        return Err(xref_error("expected a number"));
    }
    let digits = std::str::from_utf8(&data[..end]).map_err(|_| xref_error("bad digits"))?;
    let n = digits
        .parse()
        .map_err(|_| xref_error(format!("number out of range: {digits}")))?;
    Ok((n, end))
}

fn expect_prefix<'a>(data: &'a [u8], prefix: &[u8]) -> Result<&'a [u8]> {
    data.strip_prefix(prefix).ok_or_else(|| {
        xref_error(format!(
            "expected {:?}",
            String::from_utf8_lossy(prefix).as_ref()
        ))
    })
}

/// Error for an entry that does not point at its object.
///
/// Reports where the object really starts when its header can be found.
fn misplaced_object(data: &[u8], objid: usize, offset: usize, header: &str) -> ConvertError {
    let needle = format!("\n{header}\n");
    match data
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
    {
        Some(pos) => ConvertError::OffsetMismatch {
            objid: objid as u32,
            recorded: offset as u64,
            actual: pos as u64 + 1,
        },
        None => xref_error(format!("object {objid} not found at offset {offset}")),
    }
}

/// Parse the xref table of `data` and check every entry.
///
/// # Errors
/// Returns `Xref` if the table is missing or malformed or if the trailer
/// `/Size` disagrees with it. An entry that does not point at the start of
/// its object gives `OffsetMismatch` when the object exists elsewhere.
pub fn verify_xref(data: &[u8]) -> Result<XrefTable> {
    let start = find_startxref(data)?;
    let table = data
        .get(start..)
        .ok_or_else(|| xref_error(format!("startxref {start} past end of file")))?;

    let rest = expect_prefix(table, b"xref\n")?;
    let rest = expect_prefix(rest, b"0 ")?;
    let (size, used) = parse_number(rest)?;
    let mut rest = expect_prefix(&rest[used..], b"\n")?;
    if size == 0 {
        return Err(xref_error("empty xref section"));
    }

    let mut offsets = Vec::with_capacity(size - 1);
    for objid in 0..size {
        let entry = rest
            .get(..ENTRY_LEN)
            .ok_or_else(|| xref_error(format!("truncated entry for object {objid}")))?;
        let (offset, _) = parse_number(&entry[..10])?;
        let in_use = entry[17] == b'n';
        if objid == 0 {
            if in_use {
                return Err(xref_error("object 0 must be free"));
            }
        } else {
            if !in_use {
                return Err(xref_error(format!("object {objid} is not in use")));
            }
            let header = format!("{objid} 0 obj");
            let at = data.get(offset..).unwrap_or_default();
            if !at.starts_with(header.as_bytes()) {
                return Err(misplaced_object(data, objid, offset, &header));
            }
            offsets.push(offset);
        }
        rest = &rest[ENTRY_LEN..];
    }

    let rest = expect_prefix(rest, b"trailer\n")?;
    let size_key = format!("/Size {size} ");
    if !rest
        .windows(size_key.len())
        .any(|w| w == size_key.as_bytes())
    {
        return Err(xref_error(format!("trailer does not declare /Size {size}")));
    }

    debug!(start, size, "xref verified");
    Ok(XrefTable {
        start,
        size,
        offsets,
    })
}
