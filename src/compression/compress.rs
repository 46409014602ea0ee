use log::{debug, info};

use crate::bitstream::bitpacker::pack;
use crate::bwt_algorithms::bwt_sort::bwt_encode;
use crate::error::Result;
use crate::huffman_coding::huffman::{huf_encode, CodeTable};
use crate::tools::mtf::mtf_encode;

/*
    The whole block is held in memory and processed in one pass:

    data -> [BWT -> MTF] -> Huffman -> bit packing -> (payload, code table)

    The bracketed stages are skipped when use_transform is false, which suits data
    (already compressed or otherwise dense binary) where they only cost time.
*/

/// Compress a block of data. Returns the packed payload and the code table needed to
/// decompress it, with the pad metadata attached.
///
/// With use_transform the data must not contain the sentinel byte (17); such data is
/// rejected with a Validation error.
pub fn compress(data: &[u8], use_transform: bool) -> Result<(Vec<u8>, CodeTable)> {
    let transformed;
    let working: &[u8] = if use_transform {
        let bwt = bwt_encode(data)?;
        transformed = mtf_encode(&bwt);
        debug!("Transform stages produced {} bytes.", transformed.len());
        &transformed
    } else {
        data
    };

    let (bits, mut table) = huf_encode(working);
    let (payload, extra) = pack(&bits);
    table.set_extra(extra);

    info!(
        "Compressed {} bytes to {} bytes ({} table entries, transform {}).",
        data.len(),
        payload.len(),
        table.len(),
        if use_transform { "on" } else { "off" }
    );
    Ok((payload, table))
}
