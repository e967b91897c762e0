//! Per-instruction encoding.
//!
//! Every instruction is one opcode byte followed by an 8-byte little-endian
//! operand field. The field carries no kind tag; the operand's shape picks
//! the encoding, and readers recover it from the opcode.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::trace;

use ilpack_bytecode::{OPERAND_SIZE, SWITCH_TARGET_SIZE};
use ilpack_core::{Instruction, Label, Operand};

use super::wire::MAX_LEN;
use super::{BlobTable, ExportError, StringTable, reference};

/// Label → 0-based position of each instruction in one method.
#[derive(Debug, Default)]
pub struct PositionMap {
    positions: HashMap<Label, u32>,
}

impl PositionMap {
    /// Number the instructions in order. `method` names the owner in errors.
    pub fn build(method: &str, instructions: &[Instruction]) -> Result<Self, ExportError> {
        if instructions.len() > MAX_LEN {
            return Err(ExportError::TooManyInstructions {
                method: method.to_owned(),
                count: instructions.len(),
            });
        }

        let mut positions = HashMap::with_capacity(instructions.len());
        for (position, instr) in instructions.iter().enumerate() {
            match positions.entry(instr.label) {
                Entry::Occupied(_) => {
                    return Err(ExportError::DuplicateLabel {
                        method: method.to_owned(),
                        label: instr.label,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position as u32);
                }
            }
        }
        Ok(Self { positions })
    }

    pub fn position(&self, label: Label) -> Option<u32> {
        self.positions.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Encodes the instructions of one method against the session tables.
pub struct InstructionEncoder<'a> {
    method: &'a str,
    positions: &'a PositionMap,
    strings: &'a mut StringTable,
    blobs: &'a mut BlobTable,
}

impl<'a> InstructionEncoder<'a> {
    pub fn new(
        method: &'a str,
        positions: &'a PositionMap,
        strings: &'a mut StringTable,
        blobs: &'a mut BlobTable,
    ) -> Self {
        Self {
            method,
            positions,
            strings,
            blobs,
        }
    }

    /// Append opcode byte and operand field to `out`.
    pub fn encode(&mut self, instr: &Instruction, out: &mut Vec<u8>) -> Result<(), ExportError> {
        let operand = self.encode_operand(instr)?;
        out.push(instr.code.as_u8());
        out.extend_from_slice(&operand);
        Ok(())
    }

    /// Encode the operand of `instr` into its 8-byte field.
    pub fn encode_operand(&mut self, instr: &Instruction) -> Result<[u8; OPERAND_SIZE], ExportError> {
        let value: i64 = match &instr.operand {
            Operand::None => 0,
            Operand::F32(v) => return Ok(f64::from(*v).to_le_bytes()),
            Operand::F64(v) => return Ok(v.to_le_bytes()),
            Operand::I8(v) => i64::from(*v),
            Operand::U8(v) => i64::from(*v),
            Operand::I32(v) => i64::from(*v),
            Operand::U32(v) => i64::from(*v),
            Operand::I64(v) => *v,
            Operand::U64(v) => *v as i64,
            Operand::String(s) => i64::from(self.strings.get_or_intern(s)?.get()),
            Operand::Target(label) => i64::from(self.resolve(*label)?),
            Operand::Targets(labels) => i64::from(self.switch_table(labels)?),
            Operand::Member(member) => {
                return Ok(reference::encode_member(self.strings, member)?.0.to_le_bytes());
            }
            Operand::Variable(slot) => i64::from(*slot),
            Operand::Opaque(_) => {
                return Err(ExportError::UnsupportedOperandKind {
                    method: self.method.to_owned(),
                    code: instr.code,
                    kind: instr.operand.kind_name().to_owned(),
                });
            }
        };
        Ok(value.to_le_bytes())
    }

    fn resolve(&self, label: Label) -> Result<u32, ExportError> {
        self.positions
            .position(label)
            .ok_or_else(|| ExportError::UnresolvedTarget {
                method: self.method.to_owned(),
                label,
            })
    }

    /// Store the target positions as consecutive i32 values; returns the blob id.
    fn switch_table(&mut self, labels: &[Label]) -> Result<u32, ExportError> {
        let mut blob = Vec::with_capacity(labels.len() * SWITCH_TARGET_SIZE);
        for &label in labels {
            // Positions are bounded by `MAX_LEN`, so they fit an i32.
            let position = self.resolve(label)? as i32;
            blob.extend_from_slice(&position.to_le_bytes());
        }
        let id = self.blobs.push(blob)?;
        trace!(method = self.method, blob = id.get(), targets = labels.len(), "switch table");
        Ok(id.get())
    }
}
