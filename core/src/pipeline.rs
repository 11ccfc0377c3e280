// ## File: `src/pipeline.rs`
// ## Pipeline wiring: read -> extract -> build -> (verify) -> wait -> write

use std::io::Write;

use crate::config::TranscodeConfig;
use crate::image::BootImage;
use crate::io::{read_input, InputSource};
use crate::segments::{ElfSource, SegmentSource};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::BootImageError;
use crate::utils::fmt_bytes;

macro_rules! vlog {
    ($cfg:expr, $($arg:tt)*) => {
        if $cfg.verbose {
            eprintln!($($arg)*);
        }
    };
}

/// Build a boot image from an in-memory ELF file.
pub fn transcode_bytes(elf_bytes: &[u8]) -> Result<BootImage, BootImageError> {
    BootImage::from_source(&ElfSource::parse(elf_bytes)?)
}

/// Run the whole pipeline for one source and write the image to `writer`.
///
/// The source is fully read (and any file closed) before the startup delay
/// and before the first output byte. Nothing is written if reading,
/// parsing, building or verification fails.
pub fn run_transcode<W>(
    src: InputSource,
    writer: &mut W,
    cfg: &TranscodeConfig,
) -> Result<TelemetrySnapshot, BootImageError>
where
    W: Write + ?Sized,
{
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    vlog!(cfg, "[PIPELINE] Start transcode");

    // ---- Read ----
    let bytes = timer.time(Stage::Read, || read_input(src))?;
    counters.add_source(bytes.len());
    vlog!(cfg, "[READ] {} bytes", bytes.len());

    // ---- Extract ----
    let (entry_point, segments) = timer.time(Stage::Extract, || -> Result<_, BootImageError> {
        let elf = ElfSource::parse(&bytes)?;
        vlog!(cfg, "[EXTRACT] {}-bit ELF, {} PT_LOAD headers",
            if elf.is_64() { 64 } else { 32 }, elf.load_headers().count());
        Ok((elf.entry_point()?, elf.segments()?))
    })?;
    drop(bytes);
    for (i, s) in segments.iter().enumerate() {
        vlog!(cfg, "[EXTRACT] segment {}: paddr={:#010x} size={:#x} head={}",
            i, s.physical_address(), s.size(), fmt_bytes(s.payload(), 8));
    }

    // ---- Build ----
    let image = timer.time(Stage::Encode, || BootImage::build(entry_point, segments))?;
    counters.add_image(&image);
    vlog!(cfg, "[BUILD] {}", image.summary());

    // ---- Verify ----
    if cfg.verify {
        timer.time(Stage::Verify, || image.verify(&cfg.limits))?;
        vlog!(cfg, "[BUILD] Image verified");
    }

    // ---- Emit ----
    let emitter = cfg.emitter();
    vlog!(cfg, "[EMIT] Waiting {:?} before first byte", emitter.startup_delay());
    timer.time(Stage::Delay, || emitter.wait());
    let written = timer.time(Stage::Write, || emitter.write_image(writer, &image))?;
    counters.add_written(written);
    vlog!(cfg, "[EMIT] {} bytes written", written);

    timer.finish();
    let snapshot = TelemetrySnapshot::from(&counters, &timer);
    if cfg.verbose {
        match snapshot.to_json() {
            Ok(json) => eprintln!("[TELEMETRY] {}", json),
            Err(e) => eprintln!("[TELEMETRY] unavailable: {}", e),
        }
    }
    Ok(snapshot)
}
