//! ADC raw-value conversion.
//!
//! A raw reading is an unsigned integer in `0..=max_raw()` for the converter's
//! resolution. Millivolts are derived with an affine transform against the
//! reference voltage:
//!
//! ```text
//! mv = raw * reference_mv / (2^bits - 1)
//! ```
//!
//! The multiplication happens before the division so that both ends of the
//! domain map exactly: `0 -> 0.0` and `max_raw -> reference_mv`.

use serde::{Deserialize, Serialize};

/// ADC value in raw format (0-1023 for the default 10-bit converter).
pub type AdcRaw = u16;

/// ADC value in millivolts.
pub type Millivolts = f32;

/// Resolution and reference voltage of an analog-to-digital converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcScale {
    /// Converter resolution in bits. Valid range is `1..=16`.
    pub resolution_bits: u8,
    /// Voltage corresponding to the largest raw value, in millivolts.
    pub reference_mv: u32,
}

impl AdcScale {
    /// 10-bit converter with a 5 V reference (ATmega328P / Arduino Uno).
    pub const ARDUINO_UNO: Self = Self::new(10, 5000);

    /// ESP32-S3 ADC1 at 12 bits with 11 dB attenuation (about 3.1 V full scale).
    pub const ESP32S3_11DB: Self = Self::new(12, 3100);

    pub const fn new(resolution_bits: u8, reference_mv: u32) -> Self {
        Self {
            resolution_bits,
            reference_mv,
        }
    }

    /// Whether the resolution fits an [`AdcRaw`] and is non-zero.
    pub const fn is_valid(&self) -> bool {
        self.resolution_bits >= 1 && self.resolution_bits <= AdcRaw::BITS as u8
    }

    /// Largest raw value the converter can produce (1023 for 10 bits).
    pub const fn max_raw(&self) -> u32 {
        match 1u32.checked_shl(self.resolution_bits as u32) {
            Some(span) => span - 1,
            None => u32::MAX,
        }
    }

    /// Clamp a raw value into `0..=max_raw()`.
    pub const fn clamp(&self, raw: AdcRaw) -> AdcRaw {
        let max = self.max_raw();
        if raw as u32 > max { max as AdcRaw } else { raw }
    }

    /// Convert a raw reading to millivolts.
    ///
    /// Invalid scales (see [`is_valid`](Self::is_valid)) yield non-finite
    /// results rather than panicking.
    pub const fn raw_to_mv(&self, raw: AdcRaw) -> Millivolts {
        (raw as f32 * self.reference_mv as f32) / self.max_raw() as f32
    }
}

impl Default for AdcScale {
    fn default() -> Self {
        Self::ARDUINO_UNO
    }
}

/// Convert a raw reading of the default 10-bit, 5 V converter to millivolts.
pub const fn raw_to_mv(raw: AdcRaw) -> Millivolts {
    AdcScale::ARDUINO_UNO.raw_to_mv(raw)
}

/// One converted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub raw: AdcRaw,
    pub millivolts: Millivolts,
}

impl Reading {
    pub const fn from_raw(raw: AdcRaw, scale: AdcScale) -> Self {
        Self {
            raw,
            millivolts: scale.raw_to_mv(raw),
        }
    }
}
