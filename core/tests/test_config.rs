// # Configuration tests
//
// Defaults and `SENDELF_*` overrides, read through an injected lookup.

use std::collections::HashMap;
use std::time::Duration;

use bootimg_core::config::TranscodeConfig;
use bootimg_core::constants::env_keys;
use bootimg_core::image::DecodeLimits;
use bootimg_core::types::BootImageError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k: &str| map.get(k).cloned()
}

// ## 1️⃣ Defaults

#[test]
fn defaults_when_nothing_set() {
    let cfg = TranscodeConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, TranscodeConfig::default());
    assert_eq!(cfg.startup_delay, Duration::from_secs(1));
    assert!(!cfg.verbose);
    assert!(cfg.verify);
    assert_eq!(cfg.limits, DecodeLimits::unlimited());
}

// ## 2️⃣ Overrides

#[test]
fn overrides_apply() {
    let cfg = TranscodeConfig::from_lookup(lookup_from(&[
        (env_keys::DELAY_MS, "0"),
        (env_keys::VERBOSE, "true"),
        (env_keys::NO_VERIFY, "1"),
        (env_keys::MAX_SEGMENTS, "16"),
    ]))
    .unwrap();
    assert_eq!(cfg.startup_delay, Duration::ZERO);
    assert!(cfg.verbose);
    assert!(!cfg.verify);
    assert_eq!(cfg.limits, DecodeLimits::bootloader());
}

#[test]
fn flags_accept_words_and_blank() {
    let cfg = TranscodeConfig::from_lookup(lookup_from(&[
        (env_keys::VERBOSE, " ON "),
        (env_keys::NO_VERIFY, ""),
    ]))
    .unwrap();
    assert!(cfg.verbose);
    assert!(cfg.verify);
}

#[test]
fn emitter_carries_delay() {
    let cfg = TranscodeConfig::from_lookup(lookup_from(&[(env_keys::DELAY_MS, "250")])).unwrap();
    assert_eq!(cfg.emitter().startup_delay(), Duration::from_millis(250));
}

// ## 3️⃣ Invalid values

#[test]
fn bad_delay_is_usage_error() {
    let err = TranscodeConfig::from_lookup(lookup_from(&[(env_keys::DELAY_MS, "soon")])).unwrap_err();
    assert!(matches!(err, BootImageError::Usage(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn bad_flag_is_usage_error() {
    let err = TranscodeConfig::from_lookup(lookup_from(&[(env_keys::VERBOSE, "maybe")])).unwrap_err();
    assert!(matches!(err, BootImageError::Usage(_)));
}
