//! Text rendering of readings for the serial stream.
//!
//! Each reading becomes one `"<raw>, <millivolts>"` line built in a fixed
//! 16-byte buffer. A line that does not fit is replaced by [`OVERFLOW_SENTINEL`]
//! as a whole; a truncated value is never emitted.

use core::fmt::Write;

use heapless::String;
use log::warn;

use crate::adc::Reading;

/// Capacity of a report line in bytes.
pub const REPORT_CAPACITY: usize = 16;

/// Printed instead of a reading whose text does not fit the line buffer.
pub const OVERFLOW_SENTINEL: &str = "Err, Err";

/// Column header printed once when sampling starts.
pub const REPORT_HEADER: &str = "ADC; Voltage;";

/// Line terminator used on the serial stream.
pub const LINE_ENDING: &str = "\r\n";

pub type ReportLine = String<REPORT_CAPACITY>;

/// Render a reading into a [`ReportLine`].
pub fn format_reading(reading: &Reading) -> ReportLine {
    format_reading_in(reading)
}

/// Render a reading into a buffer of `N` bytes.
///
/// Millivolts are truncated to an integer. `N` must be able to hold
/// [`OVERFLOW_SENTINEL`]; smaller buffers fail to compile.
pub fn format_reading_in<const N: usize>(reading: &Reading) -> String<N> {
    const {
        assert!(
            N >= OVERFLOW_SENTINEL.len(),
            "report buffer cannot hold the overflow sentinel"
        )
    };

    let mut line = String::new();
    if write!(line, "{}, {}", reading.raw, reading.millivolts as u16).is_ok() {
        return line;
    }

    warn!(
        "Report line for raw value {} does not fit {} bytes",
        reading.raw, N
    );
    line.clear();
    // Cannot fail: the capacity was checked at compile time.
    let _ = line.push_str(OVERFLOW_SENTINEL);
    line
}
