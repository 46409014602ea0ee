//! BitString: a packed, growable sequence of bits.
//!
//! Bits are stored most significant bit first, eight to a byte. Unused low bits of the
//! final byte are always zero, so two BitStrings holding the same bits compare (and hash)
//! equal regardless of how they were built.
//!
//! The textual form used by the Huffman tools is one '0' or '1' character per bit.

use std::fmt;
use std::str::FromStr;

use crate::error::AtError;

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Create an empty BitString.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty BitString with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    /// Wrap packed bytes holding `len` bits. Returns None if the byte count does not
    /// match the bit count. Any padding bits in the last byte are cleared.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Option<Self> {
        if bytes.len() != (len + 7) / 8 {
            return None;
        }
        let tail = len % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xff << (8 - tail);
            }
        }
        Some(Self { bytes, len })
    }

    /// Number of bits held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes. The last byte is zero padded in its low bits.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Return the bit at `index`, or None if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.push_bits(bit as u64, 1);
    }

    /*
    NOTE: push_bits takes the `depth` least significant bits of `value` and appends them
    most significant first. Eg push_bits(0b0110, 3) appends 110.
    */
    /// Append the `depth` (0-64) low bits of `value`.
    pub fn push_bits(&mut self, value: u64, depth: u8) {
        debug_assert!(depth <= 64);
        let mut left = depth;
        while left > 0 {
            let used = (self.len % 8) as u8;
            if used == 0 {
                self.bytes.push(0);
            }
            let room = 8 - used;
            let take = room.min(left);
            let chunk = ((value >> (left - take)) & ((1_u64 << take) - 1)) as u8;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= chunk << (room - take);
            self.len += take as usize;
            left -= take;
        }
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        if self.len % 8 == 0 {
            // Byte aligned, so a straight copy works (other's padding is already zero)
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        let full = other.len / 8;
        for &byte in &other.bytes[..full] {
            self.push_bits(byte as u64, 8);
        }
        let tail = (other.len % 8) as u8;
        if tail > 0 {
            self.push_bits((other.bytes[full] >> (8 - tail)) as u64, tail);
        }
    }

    /// True if the first bits of self are exactly `prefix`.
    pub fn starts_with(&self, prefix: &BitString) -> bool {
        prefix.len <= self.len && self.iter().zip(prefix.iter()).all(|(a, b)| a == b)
    }

    /// Remove all bits, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.len = 0;
    }

    /// Iterate over the bits, first to last.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString(\"{}\")", self)
    }
}

impl FromStr for BitString {
    type Err = AtError;

    /// Parse a string of '0' and '1' characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitString::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                other => {
                    return Err(AtError::Decode(format!(
                        "invalid bit character {:?} at position {}",
                        other, i
                    )))
                }
            }
        }
        Ok(bits)
    }
}

#[cfg(test)]
mod test {
    use super::BitString;

    #[test]
    fn push_bits_test() {
        let mut bs = BitString::new();
        bs.push_bits(0b0110, 3);
        assert_eq!(bs.to_string(), "110");
        bs.push_bits(0b10101, 5);
        assert_eq!(bs.as_bytes(), &[0b1101_0101]);
        bs.push_bits(0x3ff, 10);
        assert_eq!(bs.len(), 18);
        assert_eq!(bs.as_bytes(), &[0b1101_0101, 0xff, 0b1100_0000]);
    }

    #[test]
    fn push_and_get_test() {
        let mut bs = BitString::new();
        for bit in [true, false, false, true, true] {
            bs.push(bit);
        }
        assert_eq!(bs.get(0), Some(true));
        assert_eq!(bs.get(2), Some(false));
        assert_eq!(bs.get(4), Some(true));
        assert_eq!(bs.get(5), None);
    }

    #[test]
    fn parse_and_display_test() {
        let text = "1001011000111";
        let bs: BitString = text.parse().unwrap();
        assert_eq!(bs.len(), 13);
        assert_eq!(bs.to_string(), text);
        assert!("10a1".parse::<BitString>().is_err());
        assert!("".parse::<BitString>().unwrap().is_empty());
    }

    #[test]
    fn extend_unaligned_test() {
        let mut a: BitString = "101".parse().unwrap();
        let b: BitString = "1100110011".parse().unwrap();
        a.extend_from(&b);
        assert_eq!(a.to_string(), "1011100110011");

        let mut c: BitString = "00000000".parse().unwrap();
        c.extend_from(&b);
        assert_eq!(c.to_string(), "000000001100110011");
    }

    #[test]
    fn starts_with_test() {
        let bs: BitString = "10110".parse().unwrap();
        assert!(bs.starts_with(&"101".parse().unwrap()));
        assert!(bs.starts_with(&BitString::new()));
        assert!(!bs.starts_with(&"100".parse().unwrap()));
        assert!(!bs.starts_with(&"101101".parse().unwrap()));
    }

    #[test]
    fn from_bytes_clears_padding_test() {
        let bs = BitString::from_bytes(vec![0xff, 0xff], 12).unwrap();
        assert_eq!(bs.to_string(), "111111111111");
        assert_eq!(bs, "111111111111".parse().unwrap());
        assert!(BitString::from_bytes(vec![0xff], 12).is_none());
    }
}
