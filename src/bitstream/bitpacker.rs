use log::trace;

use super::bitstring::BitString;
use crate::error::{AtError, Result};

/// Pack a BitString into bytes. Returns the packed bytes and `extra`, the number of
/// significant bits in the last byte (0 if the last byte is fully used).
///
/// Unlike the BitString's own storage, a partial last byte holds its bits in the
/// *least* significant positions. Eg the 11 bits 10000000_101 pack to [0x80, 0x05]
/// with extra = 3.
pub fn pack(bits: &BitString) -> (Vec<u8>, u8) {
    let extra = (bits.len() % 8) as u8;
    let mut output = bits.as_bytes().to_vec();
    if extra > 0 {
        // Right align the remaining bits in the final byte
        if let Some(last) = output.last_mut() {
            *last >>= 8 - extra;
        }
    }
    trace!("Packed {} bits into {} bytes, extra {}", bits.len(), output.len(), extra);
    (output, extra)
}

/// Unpack bytes produced by pack() back into a BitString. Every byte but the last
/// yields 8 bits; the last yields `extra` bits, or 8 if extra is 0.
pub fn unpack(payload: &[u8], extra: u8) -> Result<BitString> {
    if extra > 7 {
        return Err(AtError::Precondition(format!(
            "pad metadata must be 0-7, found {}",
            extra
        )));
    }
    let Some((&last, body)) = payload.split_last() else {
        if extra != 0 {
            return Err(AtError::Precondition(format!(
                "empty payload cannot carry {} trailing bits",
                extra
            )));
        }
        return Ok(BitString::new());
    };

    let mut bits = BitString::with_capacity(payload.len() * 8);
    for &byte in body {
        bits.push_bits(byte as u64, 8);
    }
    if extra == 0 {
        bits.push_bits(last as u64, 8);
    } else {
        // Anything set above the significant bits means the payload and extra disagree
        if last >> extra != 0 {
            return Err(AtError::Precondition(format!(
                "last payload byte {:#010b} has bits set beyond the {} significant bits",
                last, extra
            )));
        }
        bits.push_bits(last as u64, extra);
    }
    Ok(bits)
}

#[cfg(test)]
mod test {
    use super::{pack, unpack};
    use crate::bitstream::bitstring::BitString;
    use crate::error::AtError;

    fn bits_of(len: usize) -> BitString {
        // A simple irregular pattern
        let mut bits = BitString::new();
        (0..len).for_each(|i| bits.push(i % 3 == 0 || i % 7 == 1));
        bits
    }

    #[test]
    fn pack_layout_test() {
        let bits: BitString = "10000000101".parse().unwrap();
        let (out, extra) = pack(&bits);
        assert_eq!(out, vec![0x80, 0x05]);
        assert_eq!(extra, 3);

        let bits: BitString = "0010000100100000".parse().unwrap();
        assert_eq!(pack(&bits), ("! ".as_bytes().to_vec(), 0));
    }

    #[test]
    fn empty_test() {
        let (out, extra) = pack(&BitString::new());
        assert!(out.is_empty());
        assert_eq!(extra, 0);
        assert!(unpack(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn round_trip_lengths_test() {
        for len in [0, 1, 7, 8, 9, 800] {
            let bits = bits_of(len);
            let (out, extra) = pack(&bits);
            assert_eq!(out.len(), (len + 7) / 8);
            assert_eq!(unpack(&out, extra).unwrap(), bits, "length {}", len);
        }
    }

    #[test]
    fn bad_extra_test() {
        assert!(matches!(unpack(&[1], 8), Err(AtError::Precondition(_))));
        assert!(matches!(unpack(&[], 3), Err(AtError::Precondition(_))));
        // 0b1000 cannot be only 3 significant bits
        assert!(matches!(unpack(&[0b1000], 3), Err(AtError::Precondition(_))));
    }
}
