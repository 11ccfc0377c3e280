// ## File: `src/io.rs`
// ## Normalized input for the transcoder

use std::io::Read;
use std::path::PathBuf;

use crate::types::BootImageError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Read the whole source into memory. A file is closed before this returns,
/// so nothing is held open while the output is written.
pub fn read_input(src: InputSource) -> Result<Vec<u8>, BootImageError> {
    match src {
        InputSource::Memory(b) => Ok(b),
        InputSource::File(p) => Ok(std::fs::read(p)?),
        InputSource::Reader(mut r) => {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
