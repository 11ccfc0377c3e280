// # Checksum engine tests
//
// CRC-32 reference vectors and incremental folding.

use bootimg_core::checksum::{crc32, Crc32};
use bootimg_core::image::{encode_header_le, SegmentDescriptor};

// ## 1️⃣ One-shot

#[test]
fn known_vectors() {
    assert_eq!(crc32(b""), 0x0000_0000);
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    assert_eq!(crc32(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
}

// ## 2️⃣ Incremental

#[test]
fn streaming_matches_one_shot() {
    let mut c = Crc32::new();
    c.update(b"1234");
    c.update(b"");
    c.update(b"56789");
    assert_eq!(c.finalize(), crc32(b"123456789"));
}

#[test]
fn update_u32_is_little_endian() {
    let mut c = Crc32::new();
    c.update_u32(0x0800_0000);
    assert_eq!(c.finalize(), crc32(&[0x00, 0x00, 0x00, 0x08]));
}

#[test]
fn folded_header_words_match_encoded_header_checksum() {
    let descs = [
        SegmentDescriptor { physical_address: 0x0010_0000, size: 4 },
        SegmentDescriptor { physical_address: 0x0020_0000, size: 0 },
    ];
    let header = encode_header_le(0x0010_0000, &descs, 0xDEAD_BEEF).unwrap();

    let mut c = Crc32::new();
    c.update_u32(0x0010_0000);
    c.update_u32(2);
    for d in &descs {
        c.update_u32(d.physical_address);
        c.update_u32(d.size);
    }
    c.update_u32(0xDEAD_BEEF);
    assert_eq!(c.finalize().to_le_bytes(), header[28..32]);
}
