/// Byte frequency table: the occurrence count of every byte value.
pub type FrequencyTable = [u64; 256];

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FrequencyTable {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}
