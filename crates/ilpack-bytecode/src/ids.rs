//! Index newtypes and the packed member reference word.

use std::num::NonZeroU32;

macro_rules! table_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[repr(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a raw 1-based index. 0 means "absent".
            #[inline]
            pub fn new(index: u32) -> Option<Self> {
                NonZeroU32::new(index).map(Self)
            }

            /// Index of the entry stored at 0-based `position`.
            #[inline]
            pub fn from_position(position: usize) -> Option<Self> {
                u32::try_from(position)
                    .ok()
                    .and_then(|p| p.checked_add(1))
                    .and_then(Self::new)
            }

            #[inline]
            pub fn get(self) -> u32 {
                self.0.get()
            }

            /// 0-based position in the table.
            #[inline]
            pub fn position(self) -> usize {
                self.0.get() as usize - 1
            }
        }
    };
}

table_index! {
    /// 1-based index into the string table.
    StringId
}

table_index! {
    /// 1-based index into the blob table.
    BlobId
}

/// Part of a reference word that has a 16-bit budget.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyPart {
    Namespace,
    Type,
}

impl std::fmt::Display for KeyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Namespace => "namespace",
            Self::Type => "type",
        })
    }
}

/// A string index does not fit its slot in the reference word.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{part} string index {index} does not fit in 16 bits")]
pub struct KeyOverflow {
    pub part: KeyPart,
    pub index: u32,
}

/// Packed reference to a member: bits 48..64 namespace, bits 32..48
/// declaring type, bits 0..32 member name. Each part is a [`StringId`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct MemberKey(pub u64);

impl MemberKey {
    pub fn pack(namespace: StringId, ty: StringId, name: StringId) -> Result<Self, KeyOverflow> {
        let ns = Self::narrow(KeyPart::Namespace, namespace)?;
        let ty = Self::narrow(KeyPart::Type, ty)?;
        Ok(Self((ns << 48) | (ty << 32) | u64::from(name.get())))
    }

    fn narrow(part: KeyPart, id: StringId) -> Result<u64, KeyOverflow> {
        match u16::try_from(id.get()) {
            Ok(v) => Ok(u64::from(v)),
            Err(_) => Err(KeyOverflow {
                part,
                index: id.get(),
            }),
        }
    }

    pub fn namespace(self) -> Option<StringId> {
        StringId::new((self.0 >> 48) as u32)
    }

    pub fn type_name(self) -> Option<StringId> {
        StringId::new(((self.0 >> 32) & 0xffff) as u32)
    }

    pub fn name(self) -> Option<StringId> {
        StringId::new(self.0 as u32)
    }
}

/// Argument count and return flag of a method record.
///
/// Stored as `(arg_count << 1) | returns_value` in a signed 32-bit field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MethodSignature {
    pub arg_count: u32,
    pub returns_value: bool,
}

impl MethodSignature {
    /// Largest argument count that keeps the packed value non-negative.
    pub const MAX_ARGS: u32 = (i32::MAX as u32) >> 1;

    pub fn pack(self) -> i32 {
        debug_assert!(self.arg_count <= Self::MAX_ARGS);
        ((self.arg_count << 1) | u32::from(self.returns_value)) as i32
    }

    pub fn unpack(raw: i32) -> Self {
        let raw = raw as u32;
        Self {
            arg_count: raw >> 1,
            returns_value: raw & 1 == 1,
        }
    }
}
