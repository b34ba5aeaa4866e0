use crate::error::{QrError, Result};

/// An append-only sequence of bits, packed big-endian into bytes.
///
/// Bits are appended most-significant-first and can be read back individually
/// or as whole bytes. The exact bit length is always tracked; nothing is padded
/// until the caller asks for [`to_bytes`](BitBuffer::to_bytes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            length: 0,
        }
    }

    /// Returns the number of bits appended so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends the low `len` bits of `val`, most significant bit first.
    ///
    /// Bits of `val` above `len` are ignored. Fails if `len` exceeds 32.
    pub fn append_bits(&mut self, val: u32, len: u8) -> Result<()> {
        if len > 32 {
            return Err(QrError::Range {
                what: "bit width",
                value: usize::from(len),
                limit: 32,
            });
        }
        for i in (0..len).rev() {
            let shift: u8 = 7 - ((self.length as u8) & 7);
            if shift == 7 {
                self.data.push(0);
            }
            let bit: u8 = ((val >> i) as u8) & 1;
            if let Some(last) = self.data.last_mut() {
                *last |= bit << shift;
            }
            self.length += 1;
        }
        Ok(())
    }

    pub fn append_byte(&mut self, b: u8) -> Result<()> {
        self.append_bits(u32::from(b), 8)
    }

    /// Returns the bit at `index`, where 0 is the first bit appended.
    pub fn get_bit(&self, index: usize) -> Result<bool> {
        if index >= self.length {
            return Err(QrError::Range {
                what: "bit index",
                value: index,
                limit: self.length,
            });
        }
        Ok((self.data[index >> 3] >> (7 - (index & 7))) & 1 != 0)
    }

    /// Returns the bits packed into bytes; a trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
