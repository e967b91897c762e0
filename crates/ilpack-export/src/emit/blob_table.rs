//! Append-only blob table. Identical blobs are stored twice.

use std::io::Write;

use ilpack_bytecode::{BlobId, Tag};

use super::ExportError;
use super::wire::{MAX_LEN, write_table};

#[derive(Debug, Default)]
pub struct BlobTable {
    blobs: Vec<Vec<u8>>,
}

impl BlobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blob. The returned id equals the table size after the append.
    pub fn push(&mut self, blob: Vec<u8>) -> Result<BlobId, ExportError> {
        let position = self.blobs.len();
        if position >= MAX_LEN {
            return Err(ExportError::TooManyBlobs(position + 1));
        }
        let id = BlobId::from_position(position).ok_or(ExportError::TooManyBlobs(position + 1))?;
        self.blobs.push(blob);
        Ok(id)
    }

    pub fn get(&self, id: BlobId) -> Option<&[u8]> {
        self.blobs.get(id.position()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Blobs in id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.blobs.iter().map(Vec::as_slice)
    }

    /// Write the BLOB trailer section.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        write_table(out, Tag::Blob, self.iter())
    }
}
