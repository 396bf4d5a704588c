//! ADC1 oneshot adapter
//!
//! Implements probe-core's [`AnalogInput`] port for a single ESP32-S3 ADC1
//! pin. The pin is configured with 11 dB attenuation, which gives a usable
//! range of roughly 0-3.1 V at 12-bit resolution.

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcCalScheme, AdcPin};
use esp_hal::peripherals::ADC1;
use probe_core::{AdcRaw, AdcScale, AnalogInput, SensorError};

const SENSOR_NAME: &str = "ADC1";

/// Oneshot conversions on one ADC1 pin.
pub struct AnalogPin<'d, PIN, CS> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    pin: AdcPin<PIN, ADC1<'d>, CS>,
}

impl<'d, PIN, CS> AnalogPin<'d, PIN, CS>
where
    PIN: esp_hal::analog::adc::AdcChannel,
    CS: AdcCalScheme<ADC1<'d>>,
{
    pub fn new(adc: Adc<'d, ADC1<'d>, Blocking>, pin: AdcPin<PIN, ADC1<'d>, CS>) -> Self {
        Self { adc, pin }
    }
}

impl<'d, PIN, CS> AnalogInput for AnalogPin<'d, PIN, CS>
where
    PIN: esp_hal::analog::adc::AdcChannel,
    CS: AdcCalScheme<ADC1<'d>>,
{
    async fn read_raw(&mut self) -> Result<AdcRaw, SensorError> {
        // A conversion takes a few microseconds, short enough to spin on.
        nb::block!(self.adc.read_oneshot(&mut self.pin)).map_err(|_| {
            log::error!("ADC1 oneshot conversion failed");
            SensorError::ReadFailed {
                sensor: SENSOR_NAME,
                operation: "read oneshot conversion",
                details: "ADC1 did not complete the conversion",
            }
        })
    }

    fn scale(&self) -> AdcScale {
        AdcScale::ESP32S3_11DB
    }

    fn name(&self) -> &'static str {
        SENSOR_NAME
    }
}
