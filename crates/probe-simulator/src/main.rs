//! Desktop simulator for the analog-probe sampling loop.
//!
//! Feeds the probe-core [`Sampler`] a synthetic analog signal and prints the
//! report lines to stdout, exactly as the firmware would over its UART.
//!
//! # Environment
//!
//! | Variable            | Meaning                                   | Default |
//! |---------------------|-------------------------------------------|---------|
//! | `PROBE_SAMPLES`     | Stop after this many samples              | forever |
//! | `PROBE_INTERVAL_MS` | Pause between samples in milliseconds     | 500     |
//! | `RUST_LOG`          | `env_logger` filter (logs go to stderr)   | `info`  |

use std::io::Write as _;
use std::time::Duration;

use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, ErrorType, Write};
use log::{error, info, warn};

use probe_core::{AdcRaw, AdcScale, AnalogInput, ProbeConfig, Sampler, SensorError};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const DEFAULT_INTERVAL_MS: u32 = 500;

// ---------------------------------------------------------------------------
// Mock hardware
// ---------------------------------------------------------------------------

/// Slow sine wave with a faster ripple, spanning most of the 10-bit range.
struct SimulatedInput {
    /// Number of samples taken so far, used as the signal's time axis.
    ticks: u64,
    scale: AdcScale,
}

impl SimulatedInput {
    fn new(scale: AdcScale) -> Self {
        Self { ticks: 0, scale }
    }
}

impl AnalogInput for SimulatedInput {
    async fn read_raw(&mut self) -> Result<AdcRaw, SensorError> {
        let t = self.ticks as f64;
        self.ticks += 1;

        let max = f64::from(self.scale.max_raw());
        let level = 0.5 + 0.4 * (t / 20.0).sin() + 0.04 * (t / 3.7).cos();
        Ok(self.scale.clamp((level * max).round() as AdcRaw))
    }

    fn scale(&self) -> AdcScale {
        self.scale
    }

    fn name(&self) -> &'static str {
        "simulated A0"
    }
}

/// Serial sink writing to the process's stdout.
struct StdoutSink {
    out: std::io::Stdout,
}

#[derive(Debug)]
struct StdoutError(std::io::ErrorKind);

impl std::fmt::Display for StdoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stdout write failed: {}", self.0)
    }
}

impl std::error::Error for StdoutError {}

impl embedded_io_async::Error for StdoutError {
    fn kind(&self) -> ErrorKind {
        match self.0 {
            std::io::ErrorKind::BrokenPipe => ErrorKind::BrokenPipe,
            std::io::ErrorKind::Interrupted => ErrorKind::Interrupted,
            _ => ErrorKind::Other,
        }
    }
}

impl ErrorType for StdoutSink {
    type Error = StdoutError;
}

impl Write for StdoutSink {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, StdoutError> {
        self.out.write(buf).map_err(|e| StdoutError(e.kind()))
    }

    async fn flush(&mut self) -> Result<(), StdoutError> {
        self.out.flush().map_err(|e| StdoutError(e.kind()))
    }
}

/// Blocks the thread; the simulator runs a single task so nothing else needs it.
struct ThreadDelay;

impl DelayNs for ThreadDelay {
    async fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn env_u32(name: &str) -> Option<u32> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {name}={value:?}: not a non-negative integer");
            None
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ProbeConfig {
        sample_interval_ms: env_u32("PROBE_INTERVAL_MS").unwrap_or(DEFAULT_INTERVAL_MS),
        ..ProbeConfig::default()
    };
    let limit = env_u32("PROBE_SAMPLES");

    info!(
        "Simulating {} baud serial output, {} samples",
        config.baud_rate,
        limit.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
    );

    let input = SimulatedInput::new(AdcScale::ARDUINO_UNO);
    let sink = StdoutSink {
        out: std::io::stdout(),
    };
    let mut sampler = Sampler::new(input, sink, config);

    match embassy_futures::block_on(sampler.run(&mut ThreadDelay, limit)) {
        Ok(printed) => info!("Printed {printed} samples"),
        Err(e) => {
            error!("Simulator stopped: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_input_stays_in_range() {
        let mut input = SimulatedInput::new(AdcScale::ARDUINO_UNO);
        for _ in 0..500 {
            let reading = embassy_futures::block_on(input.read()).unwrap();
            assert!(reading.raw <= 1023);
            assert!((0.0..=5000.0).contains(&reading.millivolts));
        }
    }

    #[test]
    fn test_simulated_input_varies() {
        let mut input = SimulatedInput::new(AdcScale::ARDUINO_UNO);
        let first = embassy_futures::block_on(input.read_raw()).unwrap();
        let later = (0..10)
            .map(|_| embassy_futures::block_on(input.read_raw()).unwrap())
            .last()
            .unwrap();
        assert_ne!(first, later);
    }

    #[test]
    fn test_stdout_error_maps_to_serial_kind() {
        use embedded_io_async::Error as _;

        let broken = StdoutError(std::io::ErrorKind::BrokenPipe);
        assert_eq!(broken.kind(), ErrorKind::BrokenPipe);
        assert_eq!(broken.to_string(), "stdout write failed: broken pipe");
        assert_eq!(StdoutError(std::io::ErrorKind::NotFound).kind(), ErrorKind::Other);
    }
}
