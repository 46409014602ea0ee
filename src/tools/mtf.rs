use log::debug;

/// Recency order of all 256 byte values. Index 0 is the most recently seen byte.
/// A fresh table (identity order) is built for every encode or decode call.
struct RankTable {
    index: [u8; 256],
}

impl RankTable {
    fn new() -> Self {
        Self {
            index: std::array::from_fn(|i| i as u8),
        }
    }

    /// Current rank of `byte`.
    fn rank_of(&self, byte: u8) -> usize {
        // Every byte value is always present, so position() cannot miss
        self.index.iter().position(|&c| c == byte).unwrap_or(0)
    }

    fn symbol_at(&self, rank: usize) -> u8 {
        self.index[rank]
    }

    /// Move the byte at `idx` to the front, shifting everything in front of it back one.
    fn move_to_front(&mut self, mut idx: usize) {
        let temp_sym = self.index[idx];

        // Shift blocks of 8 first for speed...
        while idx > 7 {
            self.index.copy_within(idx - 8..idx, idx - 7);
            idx -= 8;
        }
        // ...then clean up any odd ones
        while idx > 0 {
            self.index[idx] = self.index[idx - 1];
            idx -= 1;
        }
        // ...and finally put the symbol at the front of the index.
        self.index[0] = temp_sym;
    }
}

/// Encode data using the Move To Front transform. Each byte is replaced by its current rank.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    let mut table = RankTable::new();
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        let idx = table.rank_of(byte);
        out.push(idx as u8);
        table.move_to_front(idx);
    }
    debug!(
        "MTF encoded {} bytes, {} zero ranks.",
        out.len(),
        out.iter().filter(|&&r| r == 0).count()
    );
    out
}

/// Decode Move To Front ranks back to the original bytes.
pub fn mtf_decode(ranks: &[u8]) -> Vec<u8> {
    let mut table = RankTable::new();
    let mut out = Vec::with_capacity(ranks.len());
    for &rank in ranks {
        out.push(table.symbol_at(rank as usize));
        table.move_to_front(rank as usize);
    }
    debug!("MTF decoded {} bytes.", out.len());
    out
}
