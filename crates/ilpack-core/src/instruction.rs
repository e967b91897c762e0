//! Decoded instructions and their operands.

use serde::Deserialize;
use serde::de::Error as DeError;
use serde_json::{Value, from_value};

use crate::{Code, MemberRef};

/// Identity of an instruction within its method (the IL offset reported
/// by the disassembler). Branch operands point at labels, not positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IL_{:04x}", self.0)
    }
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instruction {
    pub label: Label,
    #[serde(rename = "opcode")]
    pub code: Code,
    #[serde(default)]
    pub operand: Operand,
}

impl Instruction {
    pub fn new(label: u32, code: Code, operand: Operand) -> Self {
        Self {
            label: Label(label),
            code,
            operand,
        }
    }

    /// Instruction without an operand.
    pub fn bare(label: u32, code: Code) -> Self {
        Self::new(label, code, Operand::None)
    }
}

/// Operand value as decoded by the disassembler.
///
/// The value is not self-describing in the output stream; its shape here
/// decides how it is encoded.
///
/// JSON carries it as `{"kind": ..., "value": ...}`. A `kind` this model does
/// not know becomes [`Operand::Opaque`], so it fails at export rather than
/// at parse time.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawOperand")]
pub enum Operand {
    #[default]
    None,
    F32(f32),
    F64(f64),
    I8(i8),
    U8(u8),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    String(String),
    Target(Label),
    Targets(Vec<Label>),
    Member(MemberRef),
    Variable(u16),
    /// Any other operand shape, named by the disassembler
    /// (e.g. `Mono.Cecil.CallSite`). Never encodable.
    Opaque(String),
}

#[derive(Deserialize)]
struct RawOperand {
    kind: String,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawOperand> for Operand {
    type Error = serde_json::Error;

    fn try_from(raw: RawOperand) -> Result<Self, Self::Error> {
        let RawOperand { kind, value } = raw;
        Ok(match kind.as_str() {
            "none" => Self::None,
            "f32" => Self::F32(from_value::<FloatLiteral>(value)?.to_f32()?),
            "f64" => Self::F64(from_value::<FloatLiteral>(value)?.to_f64()?),
            "i8" => Self::I8(from_value(value)?),
            "u8" => Self::U8(from_value(value)?),
            "i32" => Self::I32(from_value(value)?),
            "u32" => Self::U32(from_value(value)?),
            "i64" => Self::I64(from_value(value)?),
            "u64" => Self::U64(from_value(value)?),
            "string" => Self::String(from_value(value)?),
            "target" => Self::Target(from_value(value)?),
            "targets" => Self::Targets(from_value(value)?),
            "member" => Self::Member(from_value(value)?),
            "variable" => Self::Variable(from_value(value)?),
            "opaque" => Self::Opaque(from_value(value)?),
            _ => Self::Opaque(kind),
        })
    }
}

/// Float literal in one of the forms JSON can hold: a plain number, one of
/// `"NaN"`, `"Infinity"`, `"-Infinity"`, or the raw IEEE 754 bits.
#[derive(Deserialize)]
#[serde(untagged)]
enum FloatLiteral {
    Number(f64),
    Named(String),
    Bits { bits: u64 },
}

impl FloatLiteral {
    fn to_f64(self) -> Result<f64, serde_json::Error> {
        match self {
            Self::Number(v) => Ok(v),
            Self::Named(name) => named_float(&name),
            Self::Bits { bits } => Ok(f64::from_bits(bits)),
        }
    }

    fn to_f32(self) -> Result<f32, serde_json::Error> {
        match self {
            Self::Number(v) => Ok(v as f32),
            Self::Named(name) => named_float(&name).map(|v| v as f32),
            Self::Bits { bits } => u32::try_from(bits)
                .map(f32::from_bits)
                .map_err(|_| DeError::custom(format_args!("f32 bits out of range: {bits:#x}"))),
        }
    }
}

fn named_float(name: &str) -> Result<f64, serde_json::Error> {
    match name {
        "NaN" => Ok(f64::NAN),
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        _ => Err(DeError::custom(format_args!("unknown float literal: {name}"))),
    }
}

impl Operand {
    /// Short name of the operand's shape, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::None => "none",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::I8(_) => "i8",
            Self::U8(_) => "u8",
            Self::I32(_) => "i32",
            Self::U32(_) => "u32",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::String(_) => "string",
            Self::Target(_) => "target",
            Self::Targets(_) => "targets",
            Self::Member(_) => "member",
            Self::Variable(_) => "variable",
            Self::Opaque(kind) => kind,
        }
    }
}
