//! This helper function is part of the huffman encoding system.
//!
//! It turns a byte frequency table into a prefix-free code table by the classic method:
//! keep a min-heap of subtrees, repeatedly merge the two lightest, and prefix a 0 to every
//! code in the first and a 1 to every code in the second.
//!
//! Ties between equal weights are broken by the order nodes entered the heap (leaves enter
//! in ascending byte order, merged nodes after them). That order is deterministic but is
//! not part of any compatibility promise: the decode table always travels with the data.
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use super::huffman::CodeTable;
use crate::bitstream::bitstring::BitString;
use crate::tools::freq_count::FrequencyTable;

#[derive(Eq, PartialEq, Debug)]
struct Node {
    weight: u64,
    order: u32,
    syms: Vec<u8>,
}

impl Ord for Node {
    /// Reverse order by weight then insertion order, so the BinaryHeap pops the lightest
    /// (and oldest) node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build a code table from a frequency table. Symbols with zero weight get no code.
///
/// A table with a single symbol assigns it the 1-bit code "0". An empty frequency table
/// gives an empty code table.
pub fn code_from_weights(freqs: &FrequencyTable) -> CodeTable {
    let mut heap = BinaryHeap::new();
    let mut order = 0_u32;
    for (sym, &weight) in freqs.iter().enumerate() {
        if weight > 0 {
            heap.push(Node {
                weight,
                order,
                syms: vec![sym as u8],
            });
            order += 1;
        }
    }

    let mut table = CodeTable::new();
    if heap.len() == 1 {
        if let Some(only) = heap.pop() {
            let mut code = BitString::new();
            code.push(false);
            table.insert(only.syms[0], code);
        }
        return table;
    }

    // Codes are built leaf-up, so collect the bits backwards and flip them at the end
    let mut reversed: Vec<Vec<bool>> = vec![Vec::new(); 256];
    while heap.len() > 1 {
        let (Some(lo), Some(hi)) = (heap.pop(), heap.pop()) else {
            break;
        };
        lo.syms.iter().for_each(|&s| reversed[s as usize].push(false));
        hi.syms.iter().for_each(|&s| reversed[s as usize].push(true));

        let mut syms = lo.syms;
        syms.extend(hi.syms);
        heap.push(Node {
            weight: lo.weight + hi.weight,
            order,
            syms,
        });
        order += 1;
    }

    for (sym, bits) in reversed.iter().enumerate() {
        if bits.is_empty() {
            continue;
        }
        let mut code = BitString::with_capacity(bits.len());
        bits.iter().rev().for_each(|&b| code.push(b));
        trace!("Symbol {:>3}: weight {:>8}, code {}", sym, freqs[sym], code);
        table.insert(sym as u8, code);
    }
    table
}

#[cfg(test)]
mod test {
    use super::code_from_weights;
    use crate::tools::freq_count::freqs;
    use rand::{Rng, SeedableRng};

    #[test]
    fn code_lengths_test() {
        // a:5 b:2 c:1 d:1 has only one optimal set of lengths
        let table = code_from_weights(&freqs(b"aaaaabbcd"));
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(b'a').unwrap().len(), 1);
        assert_eq!(table.get(b'b').unwrap().len(), 2);
        assert_eq!(table.get(b'c').unwrap().len(), 3);
        assert_eq!(table.get(b'd').unwrap().len(), 3);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn two_symbols_test() {
        let table = code_from_weights(&freqs(b"xyyy"));
        assert_eq!(table.get(b'x').unwrap().len(), 1);
        assert_eq!(table.get(b'y').unwrap().len(), 1);
        assert_ne!(table.get(b'x'), table.get(b'y'));
    }

    #[test]
    fn single_symbol_test() {
        let table = code_from_weights(&freqs(b"qqqq"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'q').unwrap().to_string(), "0");
    }

    #[test]
    fn empty_test() {
        assert!(code_from_weights(&freqs(b"")).is_empty());
    }

    #[test]
    fn prefix_free_random_test() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let mut f = [0_u64; 256];
            for _ in 0..rng.gen_range(2..256) {
                f[rng.gen::<u8>() as usize] += rng.gen_range(1..1000);
            }
            // Make sure there are at least two symbols
            f[0] += 1;
            f[255] += 1;
            let table = code_from_weights(&f);
            assert_eq!(table.len(), f.iter().filter(|&&w| w > 0).count());
            assert!(table.is_prefix_free());
        }
    }

    #[test]
    fn deterministic_test() {
        let f = freqs(b"abracadabra, the quick brown fox");
        assert_eq!(code_from_weights(&f), code_from_weights(&f));
    }
}
