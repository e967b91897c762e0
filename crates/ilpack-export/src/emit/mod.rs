//! Method-record emission.
//!
//! This module handles:
//! - String interning and blob storage for the trailer tables
//! - Packing member references into reference words
//! - Per-instruction operand encoding with branch-target resolution
//! - Walking types and publishing the finished stream

mod blob_table;
mod collector;
mod error;
mod exporter;
mod instruction;
pub mod reference;
mod session;
mod string_table;
mod wire;

#[cfg(test)]
mod string_table_tests;

pub use blob_table::BlobTable;
pub use collector::{collect_type, encode_method};
pub use error::ExportError;
pub use exporter::{export, export_to_path};
pub use instruction::{InstructionEncoder, PositionMap};
pub use reference::QualifiedType;
pub use session::{ExportSummary, Session};
pub use string_table::StringTable;
