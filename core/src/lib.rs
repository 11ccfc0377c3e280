//! bootimg-core
//!
//! ELF -> checksum-protected boot image framer.
//! Reads the loadable segments of an executable and frames them for a
//! minimal serial bootloader or an emulator reading from a pipe.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod io;

// Pipeline stages
pub mod checksum;
pub mod segments;
pub mod image;
pub mod emit;
pub mod telemetry;

pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::TranscodeConfig;
    pub use crate::emit::StreamEmitter;
    pub use crate::image::{decode_header, decode_image, BootImage, DecodeLimits, ImageHeader};
    pub use crate::io::InputSource;
    pub use crate::pipeline::{run_transcode, transcode_bytes};
    pub use crate::segments::{extract_from_path, Segment, SegmentSource};
    pub use crate::types::BootImageError;
}
