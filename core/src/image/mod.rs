//! image/mod.rs
//! Boot image: fixed-layout header + concatenated segment payload.
//!
//! Notes:
//! - Little-endian u32 for every header field.
//! - Header length is `16 + 8 * N`; payload follows immediately.
//! - `data_checksum` is CRC-32 of the payload; `header_checksum` is CRC-32
//!   of every header byte before it (so it never covers itself).
//! - `decode` mirrors the checks the receiving bootloader performs.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
