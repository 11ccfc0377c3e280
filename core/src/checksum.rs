//! checksum.rs
//! CRC-32 (IEEE: reflected poly 0xEDB88320, init/xorout 0xFFFFFFFF).
//!
//! Backed by `crc32fast`. The streaming form lets callers fold payloads
//! segment by segment, the same way the receiving bootloader folds header
//! words as they arrive.

use crc32fast::Hasher;

/// One-shot CRC-32 of `data`.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Incremental CRC-32. Feeding the same bytes in any split yields the
/// same value as [`crc32`] over their concatenation.
#[derive(Clone, Default)]
pub struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Fold one wire field (little-endian).
    pub fn update_u32(&mut self, v: u32) {
        self.hasher.update(&v.to_le_bytes());
    }

    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }
}
