//! The bwt_algorithms module holds the block transform of atzip.
//!
//! The Burrows-Wheeler Transform (BWT) reorders a block so that identical bytes tend to
//! cluster together, which the move-to-front and Huffman stages then exploit. A reserved
//! sentinel byte is appended to every block so the transform can be inverted without
//! storing a separate origin pointer.
//!
pub mod bwt_sort;
pub mod sentinel;
