//! sendelf
//!
//! Frame an ELF executable as a boot image on stdout:
//!
//! ```text
//! sendelf kernel.elf | qemu-system-i386 -serial stdio ...
//! ```
//!
//! Exit status: 0 on success, 1 on wrong usage, 2 on any other failure.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use bootimg_core::config::TranscodeConfig;
use bootimg_core::constants::USAGE;
use bootimg_core::io::InputSource;
use bootimg_core::pipeline::run_transcode;
use bootimg_core::types::BootImageError;

fn main() -> ExitCode {
    // Paths need not be valid UTF-8.
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let path = match args.as_slice() {
        [one] => PathBuf::from(one),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sendelf: {:#}", e);
            let code = e
                .downcast_ref::<BootImageError>()
                .map(BootImageError::exit_code)
                .unwrap_or(2);
            ExitCode::from(code)
        }
    }
}

fn run(path: PathBuf) -> anyhow::Result<()> {
    let cfg = TranscodeConfig::from_env().context("reading SENDELF_* configuration")?;
    let mut out = std::io::stdout().lock();
    run_transcode(InputSource::File(path.clone()), &mut out, &cfg)
        .with_context(|| format!("framing {}", path.display()))?;
    Ok(())
}
