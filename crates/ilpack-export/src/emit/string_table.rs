//! Deduplicating string table.
//!
//! Index 1 is the first string interned; 0 is never issued.

use std::io::Write;

use indexmap::IndexSet;

use ilpack_bytecode::{StringId, Tag};

use super::ExportError;
use super::wire::{MAX_LEN, write_table};

/// Interns strings in first-seen order and hands out stable 1-based ids.
#[derive(Debug, Default)]
pub struct StringTable {
    strings: IndexSet<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id of `s`, appending it on first sight.
    pub fn get_or_intern(&mut self, s: &str) -> Result<StringId, ExportError> {
        if let Some(id) = self.get(s) {
            return Ok(id);
        }

        let position = self.strings.len();
        if position >= MAX_LEN {
            return Err(ExportError::TooManyStrings(position + 1));
        }
        let id = StringId::from_position(position).ok_or(ExportError::TooManyStrings(position + 1))?;
        self.strings.insert(s.to_owned());
        Ok(id)
    }

    /// Lookup without insert.
    pub fn get(&self, s: &str) -> Option<StringId> {
        self.strings
            .get_index_of(s)
            .and_then(StringId::from_position)
    }

    pub fn resolve(&self, id: StringId) -> Option<&str> {
        self.strings.get_index(id.position()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Strings in id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Write the STRING trailer section.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        write_table(out, Tag::String, self.strings.iter().map(|s| s.as_bytes()))
    }
}
