//! Format constants.

/// Format version marker, written once at the very start of the stream.
pub const VERSION: u16 = 1;

/// Every operand occupies a fixed 8-byte field.
pub const OPERAND_SIZE: usize = 8;

/// Opcode byte plus operand field.
pub const INSTRUCTION_SIZE: usize = 1 + OPERAND_SIZE;

/// Each switch target in a blob is a signed 32-bit position.
pub const SWITCH_TARGET_SIZE: usize = 4;

/// Record tag preceding each method record and each trailer table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    Method = 0,
    String = 1,
    Blob = 2,
}

impl Tag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Method),
            1 => Some(Self::String),
            2 => Some(Self::Blob),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Method => "METHOD",
            Self::String => "STRING",
            Self::Blob => "BLOB",
        })
    }
}

/// Byte order of every multi-byte integer in a stream.
///
/// Writers always emit little-endian. Readers recover the order from the
/// two bytes of the version marker.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Detect the stream order from the raw version marker.
    pub fn detect(marker: [u8; 2]) -> Option<Self> {
        [Self::Little, Self::Big]
            .into_iter()
            .find(|order| order.u16(marker) == VERSION)
    }

    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn i32(self, bytes: [u8; 4]) -> i32 {
        match self {
            Self::Little => i32::from_le_bytes(bytes),
            Self::Big => i32::from_be_bytes(bytes),
        }
    }

    pub fn u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            Self::Little => u64::from_le_bytes(bytes),
            Self::Big => u64::from_be_bytes(bytes),
        }
    }
}
