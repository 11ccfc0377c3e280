// ## File: `src/emit.rs`
//! Stream emitter: optional startup pause, then header and payload in one pass.
//!
//! The pause exists for consumers attached through a pipe (an emulator or a
//! serial bridge) that need time to come up before the first byte arrives.
//! It is an explicit parameter; a zero delay skips it entirely.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::constants::DEFAULT_STARTUP_DELAY_MS;
use crate::image::BootImage;
use crate::types::BootImageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamEmitter {
    startup_delay: Duration,
}

impl Default for StreamEmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_STARTUP_DELAY_MS))
    }
}

impl StreamEmitter {
    pub fn new(startup_delay: Duration) -> Self {
        Self { startup_delay }
    }

    /// Emitter that writes immediately.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn startup_delay(&self) -> Duration {
        self.startup_delay
    }

    /// Block for the configured startup delay. No other side effects.
    pub fn wait(&self) {
        if !self.startup_delay.is_zero() {
            thread::sleep(self.startup_delay);
        }
    }

    /// Write header then payload and flush. Returns the number of bytes written.
    /// Any write or flush failure is returned as-is; nothing is retried.
    pub fn write_image<W: Write + ?Sized>(&self, writer: &mut W, image: &BootImage) -> Result<usize, BootImageError> {
        writer.write_all(image.header_bytes())?;
        for s in image.segments() {
            writer.write_all(s.payload())?;
        }
        writer.flush()?;
        Ok(image.total_len())
    }

    /// `wait` followed by `write_image`.
    pub fn emit<W: Write + ?Sized>(&self, writer: &mut W, image: &BootImage) -> Result<usize, BootImageError> {
        self.wait();
        self.write_image(writer, image)
    }
}
