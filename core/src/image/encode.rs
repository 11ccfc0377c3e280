// ## File: `src/image/encode.rs`
//! Image builder.
//!
//! Design notes:
//! - Header is assembled in a preallocated `16 + 8 * N` buffer with a write cursor.
//! - `data_checksum` is folded over the payloads segment by segment, which
//!   equals CRC-32 of their concatenation.
//! - `header_checksum` is computed last, over bytes `[0, 12 + 8N)`.

use byteorder::{ByteOrder, LittleEndian};

use crate::checksum::{crc32, Crc32};
use crate::constants::{header_checksum_offset, header_len, FIELD_LEN};
use crate::image::types::{BootImage, SegmentDescriptor};
use crate::segments::{extract_segments, Segment, SegmentSource};
use crate::types::BootImageError;
use crate::utils::to_u32;

/// Serialize a complete header (both checksums included).
///
/// # Returns
/// - `Ok(Vec<u8>)` of exactly `16 + 8 * descriptors.len()` bytes.
/// - `Err(FieldOverflow)` if the descriptor count does not fit in a u32.
pub fn encode_header_le(
    entry_point: u32,
    descriptors: &[SegmentDescriptor],
    data_checksum: u32,
) -> Result<Vec<u8>, BootImageError> {
    let count = to_u32("segment count", descriptors.len() as u64)?;

    let len = header_len(descriptors.len());
    let mut out = vec![0u8; len];
    let mut i = 0usize;

    fn put_u32(out: &mut [u8], i: &mut usize, v: u32) {
        LittleEndian::write_u32(&mut out[*i..*i + FIELD_LEN], v);
        *i += FIELD_LEN;
    }

    put_u32(&mut out, &mut i, entry_point);              // 0..4   entry point
    put_u32(&mut out, &mut i, count);                    // 4..8   segment count
    for d in descriptors {
        put_u32(&mut out, &mut i, d.physical_address);   // 8+8k   load address
        put_u32(&mut out, &mut i, d.size);               // 12+8k  on-disk size
    }
    put_u32(&mut out, &mut i, data_checksum);            // 8+8N   payload CRC

    debug_assert_eq!(i, header_checksum_offset(descriptors.len()));
    let header_checksum = crc32(&out[..i]);
    put_u32(&mut out, &mut i, header_checksum);          // 12+8N  header CRC

    debug_assert_eq!(i, len, "encoding wrote incorrect length");
    Ok(out)
}

impl BootImage {
    /// Assemble a boot image from an entry point and ordered segments.
    pub fn build(entry_point: u32, segments: Vec<Segment>) -> Result<Self, BootImageError> {
        let descriptors: Vec<SegmentDescriptor> = segments.iter().map(Segment::descriptor).collect();

        let mut data_crc = Crc32::new();
        for s in &segments {
            data_crc.update(s.payload());
        }
        let data_checksum = data_crc.finalize();

        let header = encode_header_le(entry_point, &descriptors, data_checksum)?;
        let at = header_checksum_offset(descriptors.len());
        let header_checksum = LittleEndian::read_u32(&header[at..at + FIELD_LEN]);

        Ok(Self { entry_point, segments, data_checksum, header_checksum, header })
    }

    /// Extract from `source` and build in one step.
    pub fn from_source<S: SegmentSource + ?Sized>(source: &S) -> Result<Self, BootImageError> {
        let exe = extract_segments(source)?;
        Self::build(exe.entry_point, exe.segments)
    }
}
