//! Probe configuration baked in at build time by `build.rs`.

use probe_core::ProbeConfig;

/// Postcard encoding of the build-time configuration.
static ENCODED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/probe_config.postcard"));

/// Decode the baked-in configuration, falling back to the defaults if it is
/// corrupt or invalid.
pub fn probe_config() -> ProbeConfig {
    ProbeConfig::from_bytes_or_default(ENCODED_CONFIG)
}
