//! Host telemetry line
//!
//! Format: `roll,pitch,stickX,stickY,button1,button2` with roll and pitch
//! in degrees to two decimals, raw 16-bit stick readings and `0`/`1`
//! button flags, terminated by `\n`.

use core::fmt::Write;

use heapless::String;

/// Capacity of an encoded telemetry line
pub const TELEMETRY_LINE_LEN: usize = 64;

/// Encoded telemetry line
pub type TelemetryLine = String<TELEMETRY_LINE_LEN>;

/// Errors that can occur while encoding telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Encoded line does not fit [`TELEMETRY_LINE_LEN`]
    BufferOverflow,
}

/// One telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryFrame {
    /// Roll angle in degrees
    pub roll_deg: f32,
    /// Pitch angle in degrees
    pub pitch_deg: f32,
    /// Raw horizontal stick reading (0-65535, 32768 centered)
    pub stick_x: u16,
    /// Raw vertical stick reading (0-65535, 32768 centered)
    pub stick_y: u16,
    /// Button 1 held
    pub button1: bool,
    /// Button 2 latched
    pub button2: bool,
}

impl TelemetryFrame {
    /// Encode this frame as a CSV line
    ///
    /// Non-finite angles are sent as `0.00`; the host drops lines whose
    /// first field does not parse.
    pub fn encode(&self) -> Result<TelemetryLine, TelemetryError> {
        let mut line = TelemetryLine::new();
        writeln!(
            line,
            "{:.2},{:.2},{},{},{},{}",
            finite_or_zero(self.roll_deg),
            finite_or_zero(self.pitch_deg),
            self.stick_x,
            self.stick_y,
            u8::from(self.button1),
            u8::from(self.button2),
        )
        .map_err(|_| TelemetryError::BufferOverflow)?;
        Ok(line)
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
