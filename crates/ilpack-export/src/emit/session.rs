//! Per-export state.

use std::io::Write;

use super::wire::write_version;
use super::{BlobTable, ExportError, StringTable};

/// Counts reported when an export finishes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ExportSummary {
    /// Types visited, nested types included.
    pub types: usize,
    pub methods: usize,
    pub instructions: usize,
    pub strings: usize,
    pub blobs: usize,
}

/// One export in progress: the output sink and the two tables it fills.
///
/// Created by [`Session::start`], which writes the version marker, and
/// consumed by [`Session::finish`], which writes the trailer tables.
#[derive(Debug)]
pub struct Session<W: Write> {
    sink: W,
    strings: StringTable,
    blobs: BlobTable,
    summary: ExportSummary,
}

impl<W: Write> Session<W> {
    pub fn start(mut sink: W) -> Result<Self, ExportError> {
        write_version(&mut sink)?;
        Ok(Self {
            sink,
            strings: StringTable::new(),
            blobs: BlobTable::new(),
            summary: ExportSummary::default(),
        })
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn blobs(&self) -> &BlobTable {
        &self.blobs
    }

    /// Both tables at once, for encoders that touch each.
    pub fn tables_mut(&mut self) -> (&mut StringTable, &mut BlobTable) {
        (&mut self.strings, &mut self.blobs)
    }

    pub(crate) fn write_record(&mut self, record: &[u8]) -> Result<(), ExportError> {
        self.sink.write_all(record)?;
        Ok(())
    }

    pub(crate) fn count_type(&mut self) {
        self.summary.types += 1;
    }

    pub(crate) fn count_method(&mut self, instructions: usize) {
        self.summary.methods += 1;
        self.summary.instructions += instructions;
    }

    /// Write the STRING and BLOB trailers, flush, and hand back the sink.
    pub fn finish(mut self) -> Result<(W, ExportSummary), ExportError> {
        self.strings.emit(&mut self.sink)?;
        self.blobs.emit(&mut self.sink)?;
        self.sink.flush()?;

        let summary = ExportSummary {
            strings: self.strings.len(),
            blobs: self.blobs.len(),
            ..self.summary
        };
        Ok((self.sink, summary))
    }
}
