#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Decoded method-body model for ilpack.
//!
//! The exporter never reads an executable itself. An external disassembler
//! hands over already-decoded types, methods, and instruction lists in the
//! shape defined here, either built in memory or deserialized from JSON
//! with [`parse_types`].
//!
//! The opcode table ([`Code`], [`OperandKind`]) also lives here because both
//! the exporter and every reader of the stream must agree on it.

mod instruction;
mod model;
mod opcode;

#[cfg(test)]
mod instruction_tests;

pub use instruction::{Instruction, Label, Operand};
pub use model::{MemberRef, MethodDef, TypeDef, TypeRef, VOID_TYPE};
pub use opcode::{Code, OperandKind};

/// Parse the disassembler's JSON output into top-level types.
pub fn parse_types(json: &str) -> Result<Vec<TypeDef>, serde_json::Error> {
    serde_json::from_str(json)
}
