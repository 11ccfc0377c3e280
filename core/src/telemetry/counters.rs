//! telemetry/counters.rs
//! Mutable counters collected while an image is built and emitted.

use serde::{Deserialize, Serialize};

use crate::image::BootImage;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub bytes_source: u64,
    pub segments: u64,
    pub bytes_header: u64,
    pub bytes_payload: u64,
    pub bytes_written: u64,
}

impl TelemetryCounters {
    /// Record the raw size of the source executable.
    pub fn add_source(&mut self, len: usize) {
        self.bytes_source += len as u64;
    }

    /// Record the shape of a built image.
    pub fn add_image(&mut self, image: &BootImage) {
        self.segments += image.segments().len() as u64;
        self.bytes_header += image.header_len() as u64;
        self.bytes_payload += image.payload_len() as u64;
    }

    pub fn add_written(&mut self, len: usize) {
        self.bytes_written += len as u64;
    }

    /// Header plus payload, i.e. what a complete emission writes.
    pub fn bytes_image(&self) -> u64 {
        self.bytes_header + self.bytes_payload
    }
}
