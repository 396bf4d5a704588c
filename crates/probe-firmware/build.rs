//! Bakes the probe configuration into the firmware as postcard bytes.
//!
//! Settings come from `.env` or the environment: `PROBE_BAUD_RATE`,
//! `PROBE_INTERVAL_MS` and `PROBE_PRINT_HEADER`. Anything unset keeps its
//! default. The encoded blob lands in `$OUT_DIR/probe_config.postcard`, where
//! `settings.rs` includes it.

use std::path::PathBuf;
use std::str::FromStr;

use probe_core::ProbeConfig;

const KEYS: [&str; 3] = ["PROBE_BAUD_RATE", "PROBE_INTERVAL_MS", "PROBE_PRINT_HEADER"];

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    let Ok(value) = std::env::var(key) else {
        return default;
    };
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            println!("cargo:warning=Ignoring unparsable {key}={value:?}");
            default
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=.env");
    for key in KEYS {
        println!("cargo:rerun-if-env-changed={key}");
    }
    // A missing .env just means defaults.
    let _ = dotenvy::dotenv();

    let defaults = ProbeConfig::default();
    let config = ProbeConfig {
        baud_rate: env_or("PROBE_BAUD_RATE", defaults.baud_rate),
        sample_interval_ms: env_or("PROBE_INTERVAL_MS", defaults.sample_interval_ms),
        print_header: env_or("PROBE_PRINT_HEADER", defaults.print_header),
    };
    if let Err(e) = config.validate() {
        println!("cargo:warning={e}; the firmware will fall back to defaults");
    }

    let bytes = config.to_vec().expect("Failed to encode probe configuration");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    std::fs::write(out_dir.join("probe_config.postcard"), bytes)
        .expect("Failed to write probe configuration");
}
