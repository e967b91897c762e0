//! Hand-built streams for reader tests.

use ilpack_core::Code;

use crate::{ByteOrder, MemberKey, StringId, Tag, VERSION};

pub struct StreamBuilder {
    order: ByteOrder,
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new(order: ByteOrder) -> Self {
        let marker = match order {
            ByteOrder::Little => VERSION.to_le_bytes(),
            ByteOrder::Big => VERSION.to_be_bytes(),
        };
        Self {
            order,
            bytes: marker.to_vec(),
        }
    }

    pub fn i32(mut self, v: i32) -> Self {
        match self.order {
            ByteOrder::Little => self.bytes.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::Big => self.bytes.extend_from_slice(&v.to_be_bytes()),
        }
        self
    }

    pub fn u64(mut self, v: u64) -> Self {
        match self.order {
            ByteOrder::Little => self.bytes.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::Big => self.bytes.extend_from_slice(&v.to_be_bytes()),
        }
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn method(self, key: MemberKey, signature: i32, body: &[(Code, u64)]) -> Self {
        let mut b = self
            .raw(&[Tag::Method as u8])
            .u64(key.0)
            .i32(signature)
            .i32(body.len() as i32);
        for &(code, operand) in body {
            b = b.raw(&[code.as_u8()]).u64(operand);
        }
        b
    }

    pub fn strings(self, strings: &[&str]) -> Self {
        let mut b = self.raw(&[Tag::String as u8]).i32(strings.len() as i32);
        for s in strings {
            b = b.i32(s.len() as i32).raw(s.as_bytes());
        }
        b
    }

    pub fn blobs(self, blobs: &[&[u8]]) -> Self {
        let mut b = self.raw(&[Tag::Blob as u8]).i32(blobs.len() as i32);
        for blob in blobs {
            b = b.i32(blob.len() as i32).raw(blob);
        }
        b
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn key(ns: u32, ty: u32, name: u32) -> MemberKey {
    let id = |v| StringId::new(v).unwrap();
    MemberKey::pack(id(ns), id(ty), id(name)).unwrap()
}

/// Strings shared by the sample streams.
pub const SAMPLE_STRINGS: &[&str] = &["Demo", "Program", "Fab", "Pick", "hi"];

/// `Demo.Program::Fab(int n) => n > 1 ? n + Fab(n - 1) : n`.
pub fn fab_body() -> Vec<(Code, u64)> {
    vec![
        (Code::Ldarg0, 0),
        (Code::LdcI4_1, 0),
        (Code::BleS, 10),
        (Code::Ldarg0, 0),
        (Code::Ldarg0, 0),
        (Code::LdcI4_1, 0),
        (Code::Sub, 0),
        (Code::Call, key(1, 2, 3).0),
        (Code::Add, 0),
        (Code::Ret, 0),
        (Code::Ldarg0, 0),
        (Code::Ret, 0),
    ]
}

/// A body touching the string, float, switch and variable encodings.
pub fn pick_body() -> Vec<(Code, u64)> {
    vec![
        (Code::Switch, 1),
        (Code::Ldstr, 5),
        (Code::LdcR8, 1.5f64.to_bits()),
        (Code::StlocS, 2),
        (Code::LdcI4S, (-1i64) as u64),
        (Code::Ret, 0),
    ]
}

pub fn switch_blob(order: ByteOrder) -> Vec<u8> {
    [1i32, 3, 5]
        .iter()
        .flat_map(|t| match order {
            ByteOrder::Little => t.to_le_bytes(),
            ByteOrder::Big => t.to_be_bytes(),
        })
        .collect()
}

pub fn sample_stream(order: ByteOrder) -> Vec<u8> {
    let blob = switch_blob(order);
    StreamBuilder::new(order)
        .method(key(1, 2, 3), 3, &fab_body())
        .method(key(1, 2, 4), 2, &pick_body())
        .strings(SAMPLE_STRINGS)
        .blobs(&[blob.as_slice()])
        .build()
}
