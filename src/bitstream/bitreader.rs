//! BitReader: reads a BitString one bit (or a few bits) at a time.
//!
//! Used by the Huffman decoder to walk the coded bits left to right.

use super::bitstring::BitString;

/// Reads bits from a BitString.
#[derive(Debug)]
pub struct BitReader<'a> {
    source: &'a BitString,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at the first bit.
    pub fn new(source: &'a BitString) -> Self {
        Self { source, cursor: 0 }
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        let bit = self.source.get(self.cursor)?;
        self.cursor += 1;
        Some(bit)
    }

    /// Return Option<u64> of the next n (0-64) bits, or None if fewer than n bits remain.
    /// Nothing is consumed when None is returned.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        if n > 64 || n > self.remaining() {
            return None;
        }
        let mut result = 0_u64;
        for _ in 0..n {
            // get() cannot fail here, we checked the length above
            result = result << 1 | self.source.get(self.cursor)? as u64;
            self.cursor += 1;
        }
        Some(result)
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.cursor
    }

    /// Debugging function. Report current position as [byte.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor / 8, self.cursor % 8)
    }
}
