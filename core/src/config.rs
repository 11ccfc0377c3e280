//! config.rs
//! Runtime configuration for one transcoder run.
//!
//! Defaults reproduce the classic behavior (1 s pause, quiet, self-verify).
//! `from_env` lets a wrapper script tune the pause or enable logging without
//! changing the one-argument command line.

use std::time::Duration;

use crate::constants::{env_keys, DEFAULT_STARTUP_DELAY_MS};
use crate::emit::StreamEmitter;
use crate::image::DecodeLimits;
use crate::types::BootImageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeConfig {
    /// Pause before the first output byte; zero disables it.
    pub startup_delay: Duration,
    /// Tagged progress lines and a telemetry snapshot on stderr.
    pub verbose: bool,
    /// Decode the built image and compare before sending it.
    pub verify: bool,
    /// Limits applied by the verification pass.
    pub limits: DecodeLimits,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_millis(DEFAULT_STARTUP_DELAY_MS),
            verbose: false,
            verify: true,
            limits: DecodeLimits::unlimited(),
        }
    }
}

impl TranscodeConfig {
    /// Defaults overridden by `SENDELF_*` environment variables.
    pub fn from_env() -> Result<Self, BootImageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BootImageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup(env_keys::DELAY_MS) {
            let ms: u64 = parse_value(env_keys::DELAY_MS, &v)?;
            cfg.startup_delay = Duration::from_millis(ms);
        }
        if let Some(v) = lookup(env_keys::VERBOSE) {
            cfg.verbose = parse_flag(env_keys::VERBOSE, &v)?;
        }
        if let Some(v) = lookup(env_keys::NO_VERIFY) {
            cfg.verify = !parse_flag(env_keys::NO_VERIFY, &v)?;
        }
        if let Some(v) = lookup(env_keys::MAX_SEGMENTS) {
            cfg.limits.max_segments = Some(parse_value(env_keys::MAX_SEGMENTS, &v)?);
        }

        Ok(cfg)
    }

    pub fn emitter(&self) -> StreamEmitter {
        StreamEmitter::new(self.startup_delay)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, BootImageError> {
    raw.trim()
        .parse()
        .map_err(|_| BootImageError::Usage(format!("invalid value for {key}: {raw:?}")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, BootImageError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(BootImageError::Usage(format!("invalid value for {key}: {raw:?}"))),
    }
}
