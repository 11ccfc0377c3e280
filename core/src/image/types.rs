// ## File: `src/image/types.rs`

use thiserror::Error;

use crate::constants::{header_len, BOOTLOADER_MAX_SEGMENTS};
use crate::segments::Segment;

/// Per-segment header record: where the payload goes and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDescriptor {
    pub physical_address: u32,
    pub size: u32,
}

/// Decoded view of an image header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub entry_point: u32,
    pub descriptors: Vec<SegmentDescriptor>,
    pub data_checksum: u32,
    pub header_checksum: u32,
}

impl ImageHeader {
    /// Encoded length in bytes (`16 + 8 * N`).
    pub fn len(&self) -> usize {
        header_len(self.descriptors.len())
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Sum of all segment sizes, i.e. payload bytes following the header.
    pub fn payload_len(&self) -> u64 {
        self.descriptors.iter().map(|d| d.size as u64).sum()
    }
}

/// A finished, checksummed boot image.
///
/// Built once by [`BootImage::build`] and never mutated afterwards; the
/// encoded header is kept alongside the segments so emitting it is a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootImage {
    pub(crate) entry_point: u32,
    pub(crate) segments: Vec<Segment>,
    pub(crate) data_checksum: u32,
    pub(crate) header_checksum: u32,
    pub(crate) header: Vec<u8>,
}

impl BootImage {
    pub fn entry_point(&self) -> u32 {
        self.entry_point
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn data_checksum(&self) -> u32 {
        self.data_checksum
    }

    pub fn header_checksum(&self) -> u32 {
        self.header_checksum
    }

    /// Encoded header, `header_checksum` included.
    pub fn header_bytes(&self) -> &[u8] {
        &self.header
    }

    pub fn header_len(&self) -> usize {
        self.header.len()
    }

    pub fn payload_len(&self) -> usize {
        self.segments.iter().map(|s| s.payload().len()).sum()
    }

    pub fn total_len(&self) -> usize {
        self.header_len() + self.payload_len()
    }

    /// All segment payloads concatenated in segment order.
    pub fn data_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload_len());
        for s in &self.segments {
            out.extend_from_slice(s.payload());
        }
        out
    }

    /// Complete wire image: header followed by payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len());
        out.extend_from_slice(&self.header);
        for s in &self.segments {
            out.extend_from_slice(s.payload());
        }
        out
    }

    pub fn header(&self) -> ImageHeader {
        ImageHeader {
            entry_point: self.entry_point,
            descriptors: self.segments.iter().map(Segment::descriptor).collect(),
            data_checksum: self.data_checksum,
            header_checksum: self.header_checksum,
        }
    }

    /// One-line summary for log output.
    pub fn summary(&self) -> String {
        format!(
            "entry={:#010x} segments={} header_len={} payload_len={} data_crc={:#010x} header_crc={:#010x}",
            self.entry_point,
            self.segments.len(),
            self.header_len(),
            self.payload_len(),
            self.data_checksum,
            self.header_checksum,
        )
    }
}

/// Limits applied when decoding an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum accepted segment count; `None` accepts any count.
    pub max_segments: Option<u32>,
}

impl DecodeLimits {
    pub fn unlimited() -> Self {
        Self { max_segments: None }
    }

    /// Segment table capacity of the reference serial bootloader.
    pub fn bootloader() -> Self {
        Self { max_segments: Some(BOOTLOADER_MAX_SEGMENTS) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer ends before the header or payload does.
    #[error("image buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Segment count above the configured limit.
    #[error("segment count {have} exceeds limit {max}")]
    TooManySegments { have: u32, max: u32 },

    #[error("header checksum {stored:#010x} does not match computed CRC-32 {computed:#010x}")]
    HeaderChecksum { stored: u32, computed: u32 },

    #[error("data checksum {stored:#010x} does not match computed CRC-32 {computed:#010x}")]
    DataChecksum { stored: u32, computed: u32 },

    /// Bytes left over after the declared payload.
    #[error("{extra} trailing bytes after payload")]
    TrailingBytes { extra: usize },
}
