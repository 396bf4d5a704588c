//! The read-format-print loop.
//!
//! [`Sampler`] owns the two hardware handles it needs: an [`AnalogInput`] to
//! sample and a serial sink implementing `embedded_io_async::Write`. On start it
//! prints the column header, then every sample produces one report line.

use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, Write};
use log::{debug, error, info, warn};
use thiserror_no_std::Error;

use crate::adc::Reading;
use crate::config::ProbeConfig;
use crate::report::{LINE_ENDING, REPORT_HEADER, format_reading};
use crate::sensors::{AnalogInput, SensorError};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Sensor error: {0}")]
    Sensor(SensorError),
    #[error("Serial write failed: {0:?}")]
    Serial(ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Uninitialized,
    Running,
}

pub struct Sampler<I, W> {
    input: I,
    sink: W,
    config: ProbeConfig,
    state: SamplerState,
    sample_count: u32,
    last_reading: Option<Reading>,
}

impl<I, W> Sampler<I, W>
where
    I: AnalogInput,
    W: Write,
{
    pub fn new(input: I, sink: W, config: ProbeConfig) -> Self {
        Self {
            input,
            sink,
            config,
            state: SamplerState::Uninitialized,
            sample_count: 0,
            last_reading: None,
        }
    }

    /// Print the header if configured. Does nothing once running.
    pub async fn start(&mut self) -> Result<(), ProbeError> {
        if self.state == SamplerState::Running {
            return Ok(());
        }

        if self.config.print_header {
            self.write_line(REPORT_HEADER).await?;
        }

        info!(
            "Sampling {} every {} ms",
            self.input.name(),
            self.config.sample_interval_ms
        );
        self.state = SamplerState::Running;
        Ok(())
    }

    /// Take one reading and print it. Starts the sampler first if needed.
    ///
    /// A failed read prints nothing; the sampler stays usable either way.
    pub async fn sample_once(&mut self) -> Result<Reading, ProbeError> {
        self.start().await?;

        let name = self.input.name();
        let reading = self.input.read().await.map_err(|e| {
            error!("Failed to read {}: {}", name, e);
            ProbeError::Sensor(e)
        })?;

        let line = format_reading(&reading);
        self.write_line(&line).await?;

        self.sample_count = self.sample_count.wrapping_add(1);
        self.last_reading = Some(reading);
        debug!("Sample {}: {}", self.sample_count, line);

        Ok(reading)
    }

    /// Sample forever, or until `limit` samples have been printed.
    ///
    /// Sensor failures are logged and retried after the usual interval.
    /// Serial failures end the loop, since there is nowhere left to report.
    pub async fn run<D: DelayNs>(
        &mut self,
        delay: &mut D,
        limit: Option<u32>,
    ) -> Result<u32, ProbeError> {
        self.run_counted(delay, limit, 0).await
    }

    /// Body of [`run`](Self::run), counting on from `printed`.
    ///
    /// The count saturates at `u32::MAX`; an unlimited run never stops on it.
    async fn run_counted<D: DelayNs>(
        &mut self,
        delay: &mut D,
        limit: Option<u32>,
        mut printed: u32,
    ) -> Result<u32, ProbeError> {
        while limit.is_none_or(|limit| printed < limit) {
            match self.sample_once().await {
                Ok(_) => printed = printed.saturating_add(1),
                Err(ProbeError::Sensor(e)) => warn!("Skipping sample: {}", e),
                Err(e) => return Err(e),
            }

            if self.config.sample_interval_ms > 0 {
                delay.delay_ms(self.config.sample_interval_ms).await;
            }
        }
        Ok(printed)
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Number of lines printed so far, header excluded.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Hand the hardware handles back.
    pub fn into_parts(self) -> (I, W) {
        (self.input, self.sink)
    }

    async fn write_line(&mut self, line: &str) -> Result<(), ProbeError> {
        self.sink
            .write_all(line.as_bytes())
            .await
            .map_err(serial_error)?;
        self.sink
            .write_all(LINE_ENDING.as_bytes())
            .await
            .map_err(serial_error)?;
        self.sink.flush().await.map_err(serial_error)
    }
}

fn serial_error<E: embedded_io_async::Error>(err: E) -> ProbeError {
    let kind = err.kind();
    error!("Serial write failed: {:?}", kind);
    ProbeError::Serial(kind)
}
