//! Sensor ports.
//!
//! The sampler never touches hardware directly: it is handed an
//! [`AnalogInput`] capability at startup and reads through it, so the same
//! loop runs against a real ADC pin, the simulator or a test double.

use crate::adc::{AdcRaw, AdcScale, Millivolts, Reading};
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor}: failed to {operation} ({details})")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
        details: &'static str,
    },
    #[error("{sensor}: raw value {raw} exceeds the {bits}-bit range")]
    OutOfRange {
        sensor: &'static str,
        raw: AdcRaw,
        bits: u8,
    },
}

/// Port for sampling one analog channel.
///
/// # Example Implementation
///
/// ```ignore
/// struct PotentiometerInput<'d> {
///     adc: Adc<'d, ADC1<'d>, Blocking>,
///     pin: AdcPin<GPIO1<'d>, ADC1<'d>>,
/// }
///
/// impl AnalogInput for PotentiometerInput<'_> {
///     async fn read_raw(&mut self) -> Result<AdcRaw, SensorError> {
///         nb::block!(self.adc.read_oneshot(&mut self.pin)).map_err(|_| SensorError::ReadFailed {
///             sensor: "potentiometer",
///             operation: "read oneshot conversion",
///             details: "ADC1 busy",
///         })
///     }
///
///     fn scale(&self) -> AdcScale {
///         AdcScale::ESP32S3_11DB
///     }
///
///     fn name(&self) -> &'static str {
///         "potentiometer"
///     }
/// }
/// ```
pub trait AnalogInput {
    /// Sample the channel and return the unconverted reading.
    fn read_raw(&mut self) -> impl Future<Output = Result<AdcRaw, SensorError>>;

    /// Resolution and reference voltage of the converter behind this input.
    fn scale(&self) -> AdcScale {
        AdcScale::ARDUINO_UNO
    }

    /// Short name used in log messages and errors.
    fn name(&self) -> &'static str;

    /// Sample the channel and convert the result.
    ///
    /// Raw values above [`AdcScale::max_raw`] are rejected with
    /// [`SensorError::OutOfRange`] rather than converted.
    fn read(&mut self) -> impl Future<Output = Result<Reading, SensorError>> {
        async move {
            let raw = self.read_raw().await?;
            let scale = self.scale();
            if raw as u32 > scale.max_raw() {
                return Err(SensorError::OutOfRange {
                    sensor: self.name(),
                    raw,
                    bits: scale.resolution_bits,
                });
            }
            Ok(Reading::from_raw(raw, scale))
        }
    }

    /// Sample the channel and return millivolts only.
    fn read_mv(&mut self) -> impl Future<Output = Result<Millivolts, SensorError>> {
        async move { Ok(self.read().await?.millivolts) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    struct FixedInput {
        raw: AdcRaw,
        scale: AdcScale,
    }

    impl AnalogInput for FixedInput {
        async fn read_raw(&mut self) -> Result<AdcRaw, SensorError> {
            Ok(self.raw)
        }

        fn scale(&self) -> AdcScale {
            self.scale
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_read_converts_with_input_scale() {
        let mut input = FixedInput {
            raw: 4095,
            scale: AdcScale::ESP32S3_11DB,
        };
        let reading = block_on(input.read()).unwrap();
        assert_eq!(reading.raw, 4095);
        assert_eq!(reading.millivolts, 3100.0);
        assert_eq!(block_on(input.read_mv()).unwrap(), 3100.0);
    }

    #[test]
    fn test_read_rejects_values_above_resolution() {
        let mut input = FixedInput {
            raw: 1024,
            scale: AdcScale::ARDUINO_UNO,
        };
        assert_eq!(
            block_on(input.read()),
            Err(SensorError::OutOfRange {
                sensor: "fixed",
                raw: 1024,
                bits: 10,
            })
        );
    }

    #[test]
    fn test_error_messages() {
        use alloc::string::ToString;

        let failed = SensorError::ReadFailed {
            sensor: "A0",
            operation: "read oneshot conversion",
            details: "ADC1 busy",
        };
        assert_eq!(
            failed.to_string(),
            "A0: failed to read oneshot conversion (ADC1 busy)"
        );

        let out_of_range = SensorError::OutOfRange {
            sensor: "A0",
            raw: 1024,
            bits: 10,
        };
        assert_eq!(
            out_of_range.to_string(),
            "A0: raw value 1024 exceeds the 10-bit range"
        );
    }
}
