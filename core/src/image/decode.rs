// ## File: `src/image/decode.rs`
//! Image decoding and verification.
//!
//! Design notes:
//! - Performs the same checks as the receiving bootloader: header CRC over
//!   `[0, 12 + 8N)`, then data CRC over the payload.
//! - Segment count limit is checked before any descriptor is read.
//! - Used by the pipeline to self-verify a built image before it is sent.

use byteorder::{ByteOrder, LittleEndian};

use crate::checksum::{crc32, Crc32};
use crate::constants::{header_checksum_offset, DESCRIPTOR_LEN, FIELD_LEN, HEADER_FIXED_LEN, HEADER_PREFIX_LEN};
use crate::image::types::{BootImage, DecodeError, DecodeLimits, ImageHeader, SegmentDescriptor};
use crate::segments::Segment;

/// Parse and verify an image header from the front of `buf`.
///
/// # Returns
/// - `Ok(ImageHeader)` if the buffer holds a full header with a matching header CRC.
/// - `Err(DecodeError)` on short buffer, excessive segment count, or CRC mismatch.
pub fn decode_header(buf: &[u8], limits: &DecodeLimits) -> Result<ImageHeader, DecodeError> {
    if buf.len() < HEADER_PREFIX_LEN {
        return Err(DecodeError::BufferTooShort { have: buf.len(), need: HEADER_PREFIX_LEN });
    }

    let mut i = 0usize;
    // Header words are folded into the CRC as they are read, like the bootloader does.
    let mut header_crc = Crc32::new();

    #[inline]
    fn get_u32(buf: &[u8], i: &mut usize) -> u32 {
        let v = LittleEndian::read_u32(&buf[*i..*i + FIELD_LEN]);
        *i += FIELD_LEN;
        v
    }

    let entry_point = get_u32(buf, &mut i);   // 0..4
    let count = get_u32(buf, &mut i);         // 4..8
    header_crc.update_u32(entry_point);
    header_crc.update_u32(count);

    if let Some(max) = limits.max_segments {
        if count > max {
            return Err(DecodeError::TooManySegments { have: count, max });
        }
    }

    let n = count as usize;
    let need = n
        .checked_mul(DESCRIPTOR_LEN)
        .and_then(|d| d.checked_add(HEADER_FIXED_LEN))
        .unwrap_or(usize::MAX);
    if buf.len() < need {
        return Err(DecodeError::BufferTooShort { have: buf.len(), need });
    }

    let mut descriptors = Vec::with_capacity(n);
    for _ in 0..n {
        let physical_address = get_u32(buf, &mut i);
        let size = get_u32(buf, &mut i);
        header_crc.update_u32(physical_address);
        header_crc.update_u32(size);
        descriptors.push(SegmentDescriptor { physical_address, size });
    }
    let data_checksum = get_u32(buf, &mut i);
    header_crc.update_u32(data_checksum);

    debug_assert_eq!(i, header_checksum_offset(n));
    let header_checksum = get_u32(buf, &mut i);

    let computed = header_crc.finalize();
    if header_checksum != computed {
        return Err(DecodeError::HeaderChecksum { stored: header_checksum, computed });
    }

    Ok(ImageHeader { entry_point, descriptors, data_checksum, header_checksum })
}

/// Parse and verify a complete image. `buf` must end exactly at the end of the payload.
pub fn decode_image(buf: &[u8], limits: &DecodeLimits) -> Result<BootImage, DecodeError> {
    let header = decode_header(buf, limits)?;
    let hlen = header.len();
    let body = &buf[hlen..];

    let payload_len = header.payload_len();
    if (body.len() as u64) < payload_len {
        return Err(DecodeError::BufferTooShort {
            have: buf.len(),
            need: hlen.saturating_add(usize::try_from(payload_len).unwrap_or(usize::MAX)),
        });
    }
    // payload_len <= body.len() from here on, so it fits in usize.
    let payload_len = payload_len as usize;
    if body.len() > payload_len {
        return Err(DecodeError::TrailingBytes { extra: body.len() - payload_len });
    }

    let computed = crc32(body);
    if header.data_checksum != computed {
        return Err(DecodeError::DataChecksum { stored: header.data_checksum, computed });
    }

    let mut segments = Vec::with_capacity(header.descriptors.len());
    let mut off = 0usize;
    for d in &header.descriptors {
        let end = off + d.size as usize;
        segments.push(Segment::from_descriptor(*d, body[off..end].to_vec()));
        off = end;
    }

    Ok(BootImage {
        entry_point: header.entry_point,
        segments,
        data_checksum: header.data_checksum,
        header_checksum: header.header_checksum,
        header: buf[..hlen].to_vec(),
    })
}

impl BootImage {
    /// Re-decode the encoded form and confirm it reproduces this image.
    pub fn verify(&self, limits: &DecodeLimits) -> Result<(), DecodeError> {
        let decoded = decode_image(&self.to_bytes(), limits)?;
        debug_assert_eq!(&decoded, self);
        Ok(())
    }
}
