//! Serial link to the companion
//!
//! [`SerialLink`] turns a non-blocking UART receiver into the core's
//! [`LineSource`]; [`TelemetryWriter`] paces and sends telemetry lines on
//! the transmit side.

use bathy_core::traits::LineSource;
use bathy_hal::uart::{SerialRx, SerialTx};
use bathy_protocol::{AssemblyError, LineAssembler, TelemetryError, TelemetryFrame};

/// Bytes consumed per poll at most
///
/// At 115200 baud about 58 bytes arrive per 5 ms cycle.
pub const MAX_BYTES_PER_POLL: usize = 128;

/// Receive-side counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Lines dropped for exceeding the line buffer
    pub overlong: u32,
    /// Lines dropped for invalid UTF-8
    pub invalid_utf8: u32,
    /// Receiver errors (framing, overrun)
    pub rx_errors: u32,
}

impl LinkStats {
    /// Counts added since `earlier`, wrapping like the counters
    pub fn since(&self, earlier: &LinkStats) -> LinkStats {
        LinkStats {
            overlong: self.overlong.wrapping_sub(earlier.overlong),
            invalid_utf8: self.invalid_utf8.wrapping_sub(earlier.invalid_utf8),
            rx_errors: self.rx_errors.wrapping_sub(earlier.rx_errors),
        }
    }

    /// Returns true if every counter is zero
    pub fn is_empty(&self) -> bool {
        *self == LinkStats::default()
    }
}

/// Line source over a serial receiver
pub struct SerialLink<R> {
    rx: R,
    assembler: LineAssembler,
    budget: usize,
    stats: LinkStats,
}

impl<R: SerialRx> SerialLink<R> {
    pub fn new(rx: R) -> Self {
        Self::with_budget(rx, MAX_BYTES_PER_POLL)
    }

    /// Create a link that consumes at most `budget` bytes per poll
    pub fn with_budget(rx: R, budget: usize) -> Self {
        Self {
            rx,
            assembler: LineAssembler::new(),
            budget: budget.max(1),
            stats: LinkStats::default(),
        }
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

impl<R: SerialRx> LineSource for SerialLink<R> {
    fn poll_line(&mut self) -> Option<&str> {
        let mut complete = false;

        for _ in 0..self.budget {
            let byte = match self.rx.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    // The line in progress lost bytes
                    self.stats.rx_errors = self.stats.rx_errors.wrapping_add(1);
                    self.assembler.reset();
                    break;
                }
            };

            match self.assembler.feed(byte) {
                Ok(Some(_)) => {
                    complete = true;
                    break;
                }
                Ok(None) => {}
                Err(AssemblyError::LineTooLong) => {
                    self.stats.overlong = self.stats.overlong.wrapping_add(1);
                }
                Err(AssemblyError::InvalidUtf8) => {
                    self.stats.invalid_utf8 = self.stats.invalid_utf8.wrapping_add(1);
                }
            }
        }

        if complete {
            self.assembler.line()
        } else {
            None
        }
    }
}

/// Errors that can occur while sending telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryWriteError<E> {
    /// Frame did not fit the line buffer
    Encode(TelemetryError),
    /// Transmitter rejected the data
    Serial(E),
}

/// Rate-limited telemetry sender
pub struct TelemetryWriter<T> {
    tx: T,
    period_ms: u32,
    last_sent_ms: Option<u32>,
}

impl<T: SerialTx> TelemetryWriter<T> {
    pub fn new(tx: T, period_ms: u32) -> Self {
        Self {
            tx,
            period_ms,
            last_sent_ms: None,
        }
    }

    /// Check if a line is due at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_sent_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
            None => true,
        }
    }

    /// Send `frame` if the period has elapsed
    ///
    /// Returns `Ok(true)` when a line was queued.
    pub fn send_if_due(
        &mut self,
        now_ms: u32,
        frame: &TelemetryFrame,
    ) -> Result<bool, TelemetryWriteError<T::Error>> {
        if !self.is_due(now_ms) {
            return Ok(false);
        }

        // Counts as sent even on failure so errors are paced too
        self.last_sent_ms = Some(now_ms);

        let line = frame.encode().map_err(TelemetryWriteError::Encode)?;
        self.tx
            .write_all(line.as_bytes())
            .map_err(TelemetryWriteError::Serial)?;
        Ok(true)
    }
}
