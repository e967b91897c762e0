#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Serialization of decoded method bodies into the ilpack binary format.
//!
//! An export walks the selected types, writes one method record per method,
//! and finishes with the string and blob trailer tables. All state lives in
//! an explicit [`Session`], so independent exports never share tables.
//!
//! ```ignore
//! let types = ilpack_core::parse_types(&json)?;
//! let summary = ilpack_export::export_to_path(&types, "Demo", "out.bin")?;
//! ```

pub mod emit;

#[cfg(test)]
pub mod test_utils;

pub use emit::{
    BlobTable, ExportError, ExportSummary, InstructionEncoder, PositionMap, QualifiedType,
    Session, StringTable, collect_type, encode_method, export, export_to_path, reference,
};
