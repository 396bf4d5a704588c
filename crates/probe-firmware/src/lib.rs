//! ESP32-S3 firmware-specific modules for analog-probe
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: the ADC1 pin adapter behind probe-core's `AnalogInput` port and
//! the build-time configuration.

#![no_std]

pub mod analog_pin;
pub mod settings;
