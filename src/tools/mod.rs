//! The tools module provides helper functions for atzip.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - freq_count: Byte frequency count, the input to the Huffman table builder.
//! - mtf: Move-To-Front transform and its inverse.
//!
pub mod cli;
pub mod freq_count;
pub mod mtf;
