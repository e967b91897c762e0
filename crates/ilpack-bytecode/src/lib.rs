//! Binary format for exported method bodies.
//!
//! This crate contains:
//! - Format constants (version marker, section tags, record sizes)
//! - Index newtypes and the packed member reference word
//! - The stream reader ([`Module`]) and a human-readable [`dump`]

mod constants;
mod dump;
mod ids;
mod module;
mod reader;
#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod module_tests;

pub use constants::{
    ByteOrder, INSTRUCTION_SIZE, OPERAND_SIZE, SWITCH_TARGET_SIZE, Tag, VERSION,
};
pub use dump::{dump, width_for_count};
pub use ids::{BlobId, KeyOverflow, KeyPart, MemberKey, MethodSignature, StringId};
pub use module::{Instruction, MethodRecord, Module, ModuleError, OperandValue, split_full_name};
