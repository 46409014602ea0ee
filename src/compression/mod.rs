//! The compression module chains the stages of atzip in both directions.
//!
//! Compression happens in the following steps:
//! - Burrow Wheeler Transform (optional): sort the data to increase the probability of runs of identical bytes.
//! - Move To Front transform (optional, always paired with the BWT): turn those runs into runs of small values, mostly zero.
//! - Huffman coding: encode frequent byte values using shorter bit codes and rarer values with longer codes.
//! - Bit packing: squeeze the bits into bytes, recording how much of the last byte is used.
//!
//! The first two stages help text and other structured data. For dense binary data they
//! rarely pay for themselves and can be switched off.
//!
//! Decompression follows the inverse of the compression process.
//!
//! file_ops wraps both directions (and the Huffman-only tool modes) around files and the
//! archive container.
//!

pub mod compress;
pub mod decompress;
pub mod file_ops;
