use std::collections::BTreeMap;

use log::{debug, error, trace};
use rustc_hash::FxHashMap;

use super::huffman_code_from_weights::code_from_weights;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitstring::BitString;
use crate::error::{AtError, Result};
use crate::tools::freq_count::freqs;

/// The "decoder ring": the code assigned to every byte that occurs in the data, plus the
/// pad metadata (`extra`) once the bits have been packed into bytes.
///
/// The pad metadata is attached by compress() and taken out again by decompress() before
/// the codes are used for decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
    extra: Option<u8>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code for `symbol`, returning the previous code if there was one.
    pub fn insert(&mut self, symbol: u8, code: BitString) -> Option<BitString> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// True if no code is a prefix of another (or equal to another).
    pub fn is_prefix_free(&self) -> bool {
        let codes = self.codes.values().collect::<Vec<_>>();
        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..]
                .iter()
                .all(|b| !a.starts_with(b) && !b.starts_with(a))
        })
    }

    /// Significant bits in the last packed byte, if attached.
    pub fn extra(&self) -> Option<u8> {
        self.extra
    }

    pub fn set_extra(&mut self, extra: u8) {
        self.extra = Some(extra);
    }

    /// Remove and return the pad metadata.
    pub fn take_extra(&mut self) -> Option<u8> {
        self.extra.take()
    }
}

/// Huffman encode a block. Returns the bits and the code table needed to decode them.
///
/// When the block holds a single distinct byte the table still gives it the 1-bit code "0",
/// but the bits hold the symbol *count* in binary (most significant bit first, no leading
/// zeros) instead of one code per byte. huf_decode() recognises the one-entry table and
/// reads the count back.
pub fn huf_encode(data: &[u8]) -> (BitString, CodeTable) {
    let freq = freqs(data);
    let table = code_from_weights(&freq);

    if table.len() == 1 {
        let count = data.len() as u64;
        let mut bits = BitString::new();
        bits.push_bits(count, (64 - count.leading_zeros()) as u8);
        debug!("Huffman: single symbol block of {} bytes.", count);
        return (bits, table);
    }

    // Lookup by byte value. Bytes that never occur keep an empty code and are never used.
    let mut lookup = vec![BitString::new(); 256];
    table.iter().for_each(|(s, c)| lookup[s as usize] = c.clone());

    let total = freq
        .iter()
        .zip(&lookup)
        .map(|(&f, c)| f as usize * c.len())
        .sum::<usize>();
    let mut bits = BitString::with_capacity(total);
    for &byte in data {
        bits.extend_from(&lookup[byte as usize]);
    }

    debug!(
        "Huffman: {} bytes, {} symbols, {} bits (longest code {}).",
        data.len(),
        table.len(),
        bits.len(),
        table.max_code_len()
    );
    (bits, table)
}

/// Decode Huffman bits with the table they were encoded with. The table's pad metadata (if
/// any) is ignored. Fails if the bits run out in the middle of a code, or if they form a
/// sequence no code matches.
pub fn huf_decode(bits: &BitString, table: &CodeTable) -> Result<Vec<u8>> {
    match table.len() {
        0 => {
            if bits.is_empty() {
                Ok(Vec::new())
            } else {
                Err(AtError::Decode(format!(
                    "{} bits to decode but the decode table is empty",
                    bits.len()
                )))
            }
        }
        1 => decode_single(bits, table),
        _ => decode_codes(bits, table),
    }
}

/// One-symbol table: the bits are the symbol count.
fn decode_single(bits: &BitString, table: &CodeTable) -> Result<Vec<u8>> {
    let Some((symbol, _)) = table.iter().next() else {
        return Err(AtError::Decode("decode table is empty".to_string()));
    };
    if bits.is_empty() || bits.len() > 64 || bits.get(0) != Some(true) {
        return Err(AtError::Decode(format!(
            "expected a symbol count for the single-symbol table, found {} bits",
            bits.len()
        )));
    }
    let count = BitReader::new(bits)
        .bint(bits.len())
        .ok_or_else(|| AtError::Decode("symbol count is unreadable".to_string()))?;
    let count = usize::try_from(count)
        .map_err(|_| AtError::Decode(format!("symbol count {} is too large", count)))?;
    debug!("Huffman: decoded {} copies of symbol {}.", count, symbol);
    Ok(vec![symbol; count])
}

fn decode_codes(bits: &BitString, table: &CodeTable) -> Result<Vec<u8>> {
    // Reverse the table: code -> symbol
    let mut reverse: FxHashMap<BitString, u8> = FxHashMap::default();
    reverse.reserve(table.len());
    table.iter().for_each(|(s, c)| {
        reverse.insert(c.clone(), s);
    });
    let max_len = table.max_code_len();

    let mut out = Vec::with_capacity(bits.len() / max_len.max(1));
    let mut br = BitReader::new(bits);
    let mut code = BitString::with_capacity(max_len);

    while let Some(bit) = br.bool_bit() {
        code.push(bit);
        if let Some(&sym) = reverse.get(&code) {
            trace!("{}: {} -> {}", out.len(), code, sym);
            out.push(sym);
            code.clear();
        } else if code.len() >= max_len {
            error!("No code matches {} (ending at {}).", code, br.loc());
            return Err(AtError::Decode(format!(
                "bits {} ending at {} match no code in the table",
                code,
                br.loc()
            )));
        }
    }
    if !code.is_empty() {
        return Err(AtError::Decode(format!(
            "input ended inside a code: {} leftover bits {}",
            code.len(),
            code
        )));
    }
    debug!("Huffman: decoded {} bits into {} bytes.", bits.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{huf_decode, huf_encode, CodeTable};
    use crate::bitstream::bitstring::BitString;
    use crate::error::AtError;
    use rand::{Rng, SeedableRng};

    #[test]
    fn round_trip_text_test() {
        let msg = b"Benchmark your implementation on several inputs and compare it with other \
                    compression software. The compression ratio is the ratio between the \
                    uncompressed size and compressed size of a file.";
        let (bits, table) = huf_encode(msg);
        assert!(table.is_prefix_free());
        assert!(bits.len() < msg.len() * 8);
        assert_eq!(huf_decode(&bits, &table).unwrap(), msg.to_vec());
    }

    #[test]
    fn round_trip_random_test() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let spread = rng.gen_range(1..=255_u8);
            let data = (0..rng.gen_range(2..2000))
                .map(|_| rng.gen_range(0..=spread))
                .collect::<Vec<u8>>();
            let (bits, table) = huf_encode(&data);
            assert_eq!(huf_decode(&bits, &table).unwrap(), data);
        }
    }

    #[test]
    fn encode_concatenates_codes_test() {
        let data = b"abacab";
        let (bits, table) = huf_encode(data);
        let mut expect = BitString::new();
        for &b in data {
            expect.extend_from(table.get(b).unwrap());
        }
        assert_eq!(bits, expect);
        // a:3 b:2 c:1 -> a gets 1 bit, b and c get 2
        assert_eq!(bits.len(), 3 + 2 * 2 + 2);
    }

    #[test]
    fn single_symbol_test() {
        let data = vec![0x41_u8; 1000];
        let (bits, table) = huf_encode(&data);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x41).unwrap().to_string(), "0");
        // 1000 = 0b1111101000
        assert_eq!(bits.to_string(), "1111101000");
        assert_eq!(huf_decode(&bits, &table).unwrap(), data);

        let (bits, table) = huf_encode(b"z");
        assert_eq!(bits.to_string(), "1");
        assert_eq!(huf_decode(&bits, &table).unwrap(), b"z".to_vec());
    }

    #[test]
    fn single_symbol_bad_count_test() {
        let (_, table) = huf_encode(b"zz");
        for bad in ["", "0", "0110"] {
            let bits: BitString = bad.parse().unwrap();
            assert!(matches!(huf_decode(&bits, &table), Err(AtError::Decode(_))), "{}", bad);
        }
    }

    #[test]
    fn empty_test() {
        let (bits, table) = huf_encode(b"");
        assert!(bits.is_empty());
        assert!(table.is_empty());
        assert!(huf_decode(&bits, &table).unwrap().is_empty());
        let stray: BitString = "1".parse().unwrap();
        assert!(matches!(huf_decode(&stray, &table), Err(AtError::Decode(_))));
    }

    #[test]
    fn truncated_bits_test() {
        let mut table = CodeTable::new();
        table.insert(b'a', "0".parse().unwrap());
        table.insert(b'b', "10".parse().unwrap());
        table.insert(b'c', "11".parse().unwrap());
        let good: BitString = "01011".parse().unwrap();
        assert_eq!(huf_decode(&good, &table).unwrap(), b"abc".to_vec());
        let cut: BitString = "0101".parse().unwrap();
        assert!(matches!(huf_decode(&cut, &table), Err(AtError::Decode(_))));
    }

    #[test]
    fn unmatched_bits_test() {
        // "11" is not a code, and the longest code is 2 bits
        let mut table = CodeTable::new();
        table.insert(b'a', "0".parse().unwrap());
        table.insert(b'b', "10".parse().unwrap());
        let bits: BitString = "01100".parse().unwrap();
        assert!(matches!(huf_decode(&bits, &table), Err(AtError::Decode(_))));
    }

    #[test]
    fn extra_lifecycle_test() {
        let mut table = CodeTable::new();
        assert_eq!(table.extra(), None);
        table.set_extra(5);
        assert_eq!(table.extra(), Some(5));
        assert_eq!(table.take_extra(), Some(5));
        assert_eq!(table.take_extra(), None);
    }

    #[test]
    fn prefix_check_test() {
        let mut table = CodeTable::new();
        table.insert(1, "01".parse().unwrap());
        table.insert(2, "1".parse().unwrap());
        assert!(table.is_prefix_free());
        table.insert(3, "011".parse().unwrap());
        assert!(!table.is_prefix_free());
    }
}
