use std::path::Path;

use crate::io::{read_input, InputSource};
use crate::segments::elf::ElfSource;
use crate::segments::types::{Segment, SegmentSource};
use crate::types::BootImageError;

/// Entry point plus ordered loadable segments, ready for the image builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedExecutable {
    pub entry_point: u32,
    pub segments: Vec<Segment>,
}

impl ExtractedExecutable {
    pub fn payload_len(&self) -> u64 {
        self.segments.iter().map(|s| s.size() as u64).sum()
    }
}

/// Pull entry point and segments out of any source.
pub fn extract_segments<S: SegmentSource + ?Sized>(source: &S) -> Result<ExtractedExecutable, BootImageError> {
    Ok(ExtractedExecutable {
        entry_point: source.entry_point()?,
        segments: source.segments()?,
    })
}

/// Parse an in-memory ELF file and extract its loadable segments.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<ExtractedExecutable, BootImageError> {
    let elf = ElfSource::parse(bytes)?;
    extract_segments(&elf)
}

/// Read the whole file, close it, then extract.
/// Open/read failures surface as `Io`; parse failures as `Malformed`.
pub fn extract_from_path(path: impl AsRef<Path>) -> Result<ExtractedExecutable, BootImageError> {
    let bytes = read_input(InputSource::File(path.as_ref().to_path_buf()))?;
    extract_from_bytes(&bytes)
}
