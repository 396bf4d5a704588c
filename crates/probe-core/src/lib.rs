//! Hardware-independent core library for analog-probe
//!
//! This crate contains all platform-agnostic logic for the analog probe:
//! the non-owning array views, ADC raw-to-millivolt conversion, report line
//! formatting, the sensor port trait and the sampling loop built on it.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod adc;
pub mod config;
pub mod report;
pub mod sampler;
pub mod sensors;
pub mod view;

pub use adc::{AdcRaw, AdcScale, Millivolts, Reading, raw_to_mv};
pub use config::{ConfigError, ProbeConfig};
pub use report::{OVERFLOW_SENTINEL, REPORT_HEADER, ReportLine, format_reading};
pub use sampler::{ProbeError, Sampler, SamplerState};
pub use sensors::{AnalogInput, SensorError};
pub use view::{ArrayView, ArrayViewMut, Extent, ViewError};
