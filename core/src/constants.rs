//! constants.rs
//! Wire-format sizes and runtime defaults for the boot image.
//!
//! Layout (all fields u32, little-endian):
//!
//! ```text
//! [ entry_point (4) ]
//! [ segment_count N (4) ]
//! [ physical_address (4) | size (4) ] * N
//! [ data_checksum (4) ]
//! [ header_checksum (4) ]
//! [ payload (sum of sizes) ]
//! ```

/// Every integer on the wire is a little-endian u32.
pub const FIELD_LEN: usize = 4;

/// `entry_point` + `segment_count`.
pub const HEADER_PREFIX_LEN: usize = 2 * FIELD_LEN;

/// One `physical_address` + `size` record.
pub const DESCRIPTOR_LEN: usize = 2 * FIELD_LEN;

/// `data_checksum` + `header_checksum`.
pub const HEADER_TRAILER_LEN: usize = 2 * FIELD_LEN;

/// Header length of an image with zero segments (16 bytes).
pub const HEADER_FIXED_LEN: usize = HEADER_PREFIX_LEN + HEADER_TRAILER_LEN;

/// Header length for `segment_count` segments: `16 + 8 * N`.
#[inline]
pub const fn header_len(segment_count: usize) -> usize {
    HEADER_FIXED_LEN + segment_count * DESCRIPTOR_LEN
}

/// Offset of `data_checksum` for `segment_count` segments: `8 + 8 * N`.
#[inline]
pub const fn data_checksum_offset(segment_count: usize) -> usize {
    HEADER_PREFIX_LEN + segment_count * DESCRIPTOR_LEN
}

/// Offset of `header_checksum` for `segment_count` segments: `12 + 8 * N`.
/// This is also the number of bytes the header checksum covers.
#[inline]
pub const fn header_checksum_offset(segment_count: usize) -> usize {
    data_checksum_offset(segment_count) + FIELD_LEN
}

/// Pause before the first byte so a piped emulator or serial bridge can attach.
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 1_000;

/// Segment table capacity of the reference serial bootloader.
pub const BOOTLOADER_MAX_SEGMENTS: u32 = 16;

/// Environment variables read by `TranscodeConfig::from_env`.
pub mod env_keys {
    pub const DELAY_MS: &str     = "SENDELF_DELAY_MS";
    pub const VERBOSE: &str      = "SENDELF_VERBOSE";
    pub const NO_VERIFY: &str    = "SENDELF_NO_VERIFY";
    pub const MAX_SEGMENTS: &str = "SENDELF_MAX_SEGMENTS";
}

pub const USAGE: &str = "usage: sendelf <executable>";
