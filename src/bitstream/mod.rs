//! The bitstream module forms the bit-level I/O subsystem of atzip.
//!
//! - bitstring: a packed, growable bit vector, the currency between the Huffman coder and the packer.
//! - bitreader: a cursor that reads a bitstring bit by bit.
//! - bitpacker: converts a bitstring to dense bytes (and back), recording how many bits of the
//!   last byte are significant.
//! - container: the on-disk archive holding the packed payload and its decode table.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitstring;
pub mod container;
