use crate::error::{DecodeError, Result};

/// Bounds-checked reader over one delta frame's bytes
pub struct DeltaStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DeltaStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos < self.data.len() {
            let byte = self.data[self.pos];
            self.pos += 1;
            Ok(byte)
        } else {
            Err(DecodeError::UnexpectedEof)
        }
    }

    /// Read exactly `length` bytes; a shortfall is a truncated frame.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        if length > self.remaining() {
            return Err(DecodeError::TruncatedFrame {
                declared: length,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + length];
        self.pos += length;
        Ok(bytes)
    }
}
