//! The huffman module is the entropy coder of atzip.
//!
//! One code table is built per compression call from the byte frequencies of the data it is
//! about to code. The table (the "decoder ring") has to travel with the coded bits; nothing
//! about it can be reconstructed from the bits alone.
//!
//! - huffman_code_from_weights: builds the prefix-free code table from a frequency table.
//! - huffman: the CodeTable type and the encode/decode functions.
//!

pub mod huffman;
pub mod huffman_code_from_weights;
