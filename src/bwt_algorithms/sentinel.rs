use log::warn;

use crate::error::{AtError, Result};

/// The reserved byte that marks the end of a block during the Burrows-Wheeler Transform.
///
/// It must never appear in data handed to the transform. Blocks containing it are
/// rejected rather than silently corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sentinel(u8);

impl Sentinel {
    pub const DEFAULT: Sentinel = Sentinel(17);

    pub const fn new(byte: u8) -> Self {
        Sentinel(byte)
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    /// Fails with a Validation error naming the first offset holding the sentinel.
    pub fn validate(self, block: &[u8]) -> Result<()> {
        match block.iter().position(|&b| b == self.0) {
            Some(offset) => {
                warn!("Sentinel byte {} found at offset {}.", self.0, offset);
                Err(AtError::Validation {
                    sentinel: self.0,
                    offset,
                })
            }
            None => Ok(()),
        }
    }

    /// Validate the block and return a copy with the sentinel appended.
    pub fn anchor(self, block: &[u8]) -> Result<Vec<u8>> {
        self.validate(block)?;
        let mut anchored = Vec::with_capacity(block.len() + 1);
        anchored.extend_from_slice(block);
        anchored.push(self.0);
        Ok(anchored)
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
