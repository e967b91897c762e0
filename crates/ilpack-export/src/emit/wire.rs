//! Little-endian primitives shared by every record writer.

use std::io::{self, Write};

use ilpack_bytecode::Tag;

use super::ExportError;

/// Largest count or length a signed 32-bit field can carry.
pub(crate) const MAX_LEN: usize = i32::MAX as usize;

pub(crate) fn put_u8(buf: &mut Vec<u8>, v: u8) {
    buf.push(v);
}

pub(crate) fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub(crate) fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub(crate) fn len_i32(len: usize) -> Option<i32> {
    i32::try_from(len).ok()
}

/// Write a trailer table: tag, entry count, then length-prefixed entries.
pub(crate) fn write_table<'a, W: Write>(
    out: &mut W,
    tag: Tag,
    entries: impl ExactSizeIterator<Item = &'a [u8]>,
) -> Result<(), ExportError> {
    let count = entries.len();
    let mut header = Vec::with_capacity(5);
    put_u8(&mut header, tag as u8);
    put_i32(&mut header, len_i32(count).ok_or_else(|| too_many(tag, count))?);
    out.write_all(&header)?;

    for entry in entries {
        let len = len_i32(entry.len()).ok_or(ExportError::EntryTooLarge {
            tag,
            len: entry.len(),
        })?;
        out.write_all(&len.to_le_bytes())?;
        out.write_all(entry)?;
    }
    Ok(())
}

fn too_many(tag: Tag, count: usize) -> ExportError {
    match tag {
        Tag::Blob => ExportError::TooManyBlobs(count),
        _ => ExportError::TooManyStrings(count),
    }
}

pub(crate) fn write_version<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(&ilpack_bytecode::VERSION.to_le_bytes())
}
