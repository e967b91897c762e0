//! Reader for exported streams.
//!
//! A [`Module`] is fully decoded on load: the version marker, every method
//! record, and both trailer tables. Operands stay raw until asked for with
//! [`Instruction::operand`], since their meaning depends on the opcode.

use std::io;
use std::path::Path;

use ilpack_core::{Code, OperandKind};

use crate::constants::{ByteOrder, SWITCH_TARGET_SIZE, Tag};
use crate::ids::{BlobId, MemberKey, MethodSignature, StringId};
use crate::reader::Reader;

/// Module load error.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("unexpected end of stream at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: usize, needed: usize },
    #[error("unknown version marker {0:02x?}")]
    UnknownVersion([u8; 2]),
    #[error("unknown record tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("unknown opcode {byte} at offset {offset}")]
    UnknownOpcode { byte: u8, offset: usize },
    #[error("negative {what} {value} at offset {offset}")]
    NegativeLength {
        what: &'static str,
        value: i32,
        offset: usize,
    },
    #[error("string {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },
    #[error("missing {0} section")]
    MissingSection(Tag),
    #[error("duplicate {0} section")]
    DuplicateSection(Tag),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One decoded instruction with its raw operand field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub code: Code,
    /// Operand field, already converted from the stream's byte order.
    pub raw: u64,
}

/// Operand of an [`Instruction`], interpreted through its opcode.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OperandValue {
    None,
    Integer(i64),
    Float(f64),
    String(Option<StringId>),
    /// 0-based position of the target in the same method.
    Target(u64),
    Targets(Option<BlobId>),
    Member(MemberKey),
    Variable(u64),
    /// Opaque field of an opcode without a defined encoding.
    Signature(u64),
}

impl Instruction {
    pub fn operand(&self) -> OperandValue {
        let raw = self.raw;
        match self.code.operand_kind() {
            OperandKind::None => OperandValue::None,
            OperandKind::Integer => OperandValue::Integer(raw as i64),
            OperandKind::Float => OperandValue::Float(f64::from_bits(raw)),
            OperandKind::String => OperandValue::String(index(raw).and_then(StringId::new)),
            OperandKind::Target => OperandValue::Target(raw),
            OperandKind::Targets => OperandValue::Targets(index(raw).and_then(BlobId::new)),
            OperandKind::Member => OperandValue::Member(MemberKey(raw)),
            OperandKind::Variable => OperandValue::Variable(raw),
            OperandKind::Signature => OperandValue::Signature(raw),
        }
    }
}

fn index(raw: u64) -> Option<u32> {
    u32::try_from(raw).ok()
}

/// A method record: who it is, its signature, and its body.
#[derive(Clone, PartialEq, Debug)]
pub struct MethodRecord {
    pub key: MemberKey,
    pub signature: MethodSignature,
    pub instructions: Vec<Instruction>,
}

/// A decoded export.
#[derive(Debug)]
pub struct Module {
    order: ByteOrder,
    methods: Vec<MethodRecord>,
    strings: Vec<String>,
    blobs: Vec<Vec<u8>>,
}

impl Module {
    /// Load a module from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Load a module from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModuleError> {
        let mut r = Reader::new(bytes);
        let marker = r.marker()?;
        let order = ByteOrder::detect(marker).ok_or(ModuleError::UnknownVersion(marker))?;
        r.set_order(order);

        let mut methods = Vec::new();
        let mut strings: Option<Vec<String>> = None;
        let mut blobs: Option<Vec<Vec<u8>>> = None;

        while !r.is_at_end() {
            let offset = r.offset();
            let byte = r.u8()?;
            let tag = Tag::from_u8(byte).ok_or(ModuleError::UnknownTag { tag: byte, offset })?;
            match tag {
                Tag::Method => methods.push(read_method(&mut r)?),
                Tag::String if strings.is_some() => {
                    return Err(ModuleError::DuplicateSection(tag));
                }
                Tag::String => strings = Some(read_strings(&mut r)?),
                Tag::Blob if blobs.is_some() => return Err(ModuleError::DuplicateSection(tag)),
                Tag::Blob => blobs = Some(read_blobs(&mut r)?),
            }
        }

        Ok(Self {
            order,
            methods,
            strings: strings.ok_or(ModuleError::MissingSection(Tag::String))?,
            blobs: blobs.ok_or(ModuleError::MissingSection(Tag::Blob))?,
        })
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    /// Interned strings in index order (index 1 first).
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Blobs in index order (index 1 first).
    pub fn blobs(&self) -> &[Vec<u8>] {
        &self.blobs
    }

    pub fn string(&self, id: StringId) -> Option<&str> {
        self.strings.get(id.position()).map(String::as_str)
    }

    /// Index of `s` in the string table, or `None` when it was never interned.
    pub fn find_string(&self, s: &str) -> Option<StringId> {
        let position = self.strings.iter().position(|x| x == s)?;
        StringId::from_position(position)
    }

    pub fn blob(&self, id: BlobId) -> Option<&[u8]> {
        self.blobs.get(id.position()).map(Vec::as_slice)
    }

    /// Decode a switch blob into target positions.
    pub fn switch_targets(&self, id: BlobId) -> Option<Vec<i32>> {
        let blob = self.blob(id)?;
        if blob.len() % SWITCH_TARGET_SIZE != 0 {
            return None;
        }
        let targets = blob
            .chunks_exact(SWITCH_TARGET_SIZE)
            .map(|c| self.order.i32([c[0], c[1], c[2], c[3]]))
            .collect();
        Some(targets)
    }

    /// Format a reference word as `Namespace.Type::Name`.
    pub fn member_name(&self, key: MemberKey) -> Option<String> {
        let ns = self.string(key.namespace()?)?;
        let ty = self.string(key.type_name()?)?;
        let name = self.string(key.name()?)?;
        Some(format!("{ns}.{ty}::{name}"))
    }

    /// Reference word for a member, or `None` if any part was never interned.
    pub fn member_key(&self, namespace: &str, ty: &str, name: &str) -> Option<MemberKey> {
        MemberKey::pack(
            self.find_string(namespace)?,
            self.find_string(ty)?,
            self.find_string(name)?,
        )
        .ok()
    }

    /// Find a method by `Namespace.Type::Name`.
    pub fn find_method(&self, full_name: &str) -> Option<&MethodRecord> {
        let (ns, ty, name) = split_full_name(full_name)?;
        let key = self.member_key(ns, ty, name)?;
        self.methods.iter().find(|m| m.key == key)
    }
}

/// Split `Namespace.Type::Name` at `::`, then at the last `.`.
///
/// Nested types keep their `/` separators: `N.Outer/Inner::M` splits into
/// `("N", "Outer/Inner", "M")`. A type without a namespace yields `""`.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str, &str)> {
    let (qualified, name) = full_name.split_once("::")?;
    let (ns, ty) = qualified.rsplit_once('.').unwrap_or(("", qualified));
    Some((ns, ty, name))
}

fn read_method(r: &mut Reader<'_>) -> Result<MethodRecord, ModuleError> {
    let key = MemberKey(r.u64()?);
    let signature = MethodSignature::unpack(r.i32()?);
    let count = r.count("instruction count")?;

    let mut instructions = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let offset = r.offset();
        let byte = r.u8()?;
        let code = Code::from_u8(byte).ok_or(ModuleError::UnknownOpcode { byte, offset })?;
        instructions.push(Instruction {
            code,
            raw: r.u64()?,
        });
    }

    Ok(MethodRecord {
        key,
        signature,
        instructions,
    })
}

fn read_strings(r: &mut Reader<'_>) -> Result<Vec<String>, ModuleError> {
    let count = r.count("string count")?;
    let mut strings = Vec::with_capacity(count.min(1024));
    for index in 0..count {
        let len = r.count("string length")?;
        let bytes = r.take(len)?;
        let s = std::str::from_utf8(bytes).map_err(|_| ModuleError::InvalidUtf8 {
            index: index + 1,
        })?;
        strings.push(s.to_owned());
    }
    Ok(strings)
}

fn read_blobs(r: &mut Reader<'_>) -> Result<Vec<Vec<u8>>, ModuleError> {
    let count = r.count("blob count")?;
    let mut blobs = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let len = r.count("blob length")?;
        blobs.push(r.take(len)?.to_vec());
    }
    Ok(blobs)
}
