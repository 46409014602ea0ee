//! atzip: a small lossless compressor for whole files.
//!
//! Data goes through an optional Burrows-Wheeler transform and Move-To-Front transform,
//! is Huffman coded, and the bits are packed into bytes. The decode table travels next to
//! the payload in a simple archive container.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> atzip -c -i test.txt -o test.atz`
//!
//! and to restore it:
//!
//! `$> atzip -d -i test.atz -o test.txt`
//!
//! Binary input that may contain the sentinel byte (17) should be compressed with `-b`,
//! which skips the transform stages.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use bitstream::bitpacker::{pack, unpack};
pub use bitstream::bitstring::BitString;
pub use bitstream::container::{read_archive, write_archive, Archive};
pub use bwt_algorithms::bwt_sort::{bwt_decode, bwt_encode};
pub use bwt_algorithms::sentinel::Sentinel;
pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use error::{AtError, Result};
pub use huffman_coding::huffman::{huf_decode, huf_encode, CodeTable};
pub use tools::mtf::{mtf_decode, mtf_encode};
