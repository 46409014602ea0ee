use log::{debug, info};

use crate::bitstream::bitpacker::unpack;
use crate::bwt_algorithms::bwt_sort::bwt_decode;
use crate::error::{AtError, Result};
use crate::huffman_coding::huffman::{huf_decode, CodeTable};
use crate::tools::mtf::mtf_decode;

/// Decompress a payload made by compress(). `table` must be the table compress() returned
/// for this payload, pad metadata included, and use_transform must match too.
pub fn decompress(payload: &[u8], mut table: CodeTable, use_transform: bool) -> Result<Vec<u8>> {
    // The pad metadata is stripped before the table is used for decoding
    let extra = table.take_extra().ok_or_else(|| {
        AtError::Precondition("decode table carries no pad metadata".to_string())
    })?;

    let bits = unpack(payload, extra)?;
    debug!("Unpacked {} bytes into {} bits.", payload.len(), bits.len());

    let working = huf_decode(&bits, &table)?;

    let data = if use_transform {
        bwt_decode(&mtf_decode(&working))?
    } else {
        working
    };

    info!("Decompressed {} bytes to {} bytes.", payload.len(), data.len());
    Ok(data)
}
