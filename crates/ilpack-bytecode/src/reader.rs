//! Byte cursor over a stream in a known byte order.

use crate::constants::ByteOrder;
use crate::module::ModuleError;

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            order: ByteOrder::Little,
        }
    }

    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], ModuleError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ModuleError::UnexpectedEof {
                offset: self.pos,
                needed: len,
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ModuleError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, ModuleError> {
        Ok(self.take(1)?[0])
    }

    pub fn marker(&mut self) -> Result<[u8; 2], ModuleError> {
        self.array()
    }

    pub fn i32(&mut self) -> Result<i32, ModuleError> {
        let bytes = self.array()?;
        Ok(self.order.i32(bytes))
    }

    pub fn u64(&mut self) -> Result<u64, ModuleError> {
        let bytes = self.array()?;
        Ok(self.order.u64(bytes))
    }

    /// Read a signed 32-bit count or length, rejecting negative values.
    pub fn count(&mut self, what: &'static str) -> Result<usize, ModuleError> {
        let offset = self.pos;
        let value = self.i32()?;
        usize::try_from(value).map_err(|_| ModuleError::NegativeLength {
            what,
            value,
            offset,
        })
    }
}
