//! Probe configuration.
//!
//! Encoded with postcard. The firmware build script bakes the encoded bytes
//! into the image; every field has a default so a bad blob still samples.

use alloc::vec::Vec;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Serial baud rate.
    pub baud_rate: u32,
    /// Pause between two samples. Zero samples back to back.
    pub sample_interval_ms: u32,
    /// Print the column header before the first sample.
    pub print_header: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            sample_interval_ms: 0,
            print_header: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to decode configuration: {0}")]
    Decode(postcard::Error),
    #[error("Failed to encode configuration: {0}")]
    Encode(postcard::Error),
    #[error("Invalid baud rate: {0}")]
    InvalidBaudRate(u32),
}

impl ProbeConfig {
    /// Decode and validate a configuration.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode a configuration, using the defaults if it is corrupt or invalid.
    pub fn from_bytes_or_default(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes).unwrap_or_else(|e| {
            warn!("{}, using default configuration", e);
            Self::default()
        })
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate(self.baud_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_arduino_sketch() {
        let config = ProbeConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert!(config.print_header);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postcard_round_trip() {
        let config = ProbeConfig {
            baud_rate: 115_200,
            sample_interval_ms: 250,
            print_header: false,
        };
        let bytes = config.to_vec().unwrap();
        assert_eq!(ProbeConfig::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_baud_rate() {
        let config = ProbeConfig {
            baud_rate: 0,
            ..ProbeConfig::default()
        };
        let bytes = config.to_vec().unwrap();
        assert!(matches!(
            ProbeConfig::from_bytes(&bytes),
            Err(ConfigError::InvalidBaudRate(0))
        ));
    }

    #[test]
    fn test_rejects_truncated_bytes() {
        assert!(matches!(
            ProbeConfig::from_bytes(&[]),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_bad_bytes_fall_back_to_defaults() {
        let config = ProbeConfig {
            baud_rate: 115_200,
            sample_interval_ms: 1000,
            print_header: false,
        };
        let bytes = config.to_vec().unwrap();
        assert_eq!(ProbeConfig::from_bytes_or_default(&bytes), config);

        let zero_baud = ProbeConfig {
            baud_rate: 0,
            ..config
        }
        .to_vec()
        .unwrap();
        assert_eq!(
            ProbeConfig::from_bytes_or_default(&zero_baud),
            ProbeConfig::default()
        );
        assert_eq!(
            ProbeConfig::from_bytes_or_default(&bytes[..1]),
            ProbeConfig::default(),
            "truncated bytes must not decode"
        );
    }
}
