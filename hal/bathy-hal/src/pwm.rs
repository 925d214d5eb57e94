//! PWM output abstraction
//!
//! A piezo buzzer is driven with a square wave: the PWM frequency sets the
//! pitch and a 50 % duty cycle gives the loudest tone. Duty 0 silences it.

/// Half duty (square wave)
pub const DUTY_HALF: u16 = 32768;

/// PWM frequency request that the hardware cannot produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyOutOfRange {
    /// Requested frequency in Hz
    pub requested_hz: u32,
}

/// Single PWM channel
pub trait PwmOutput {
    /// Set the output frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> Result<(), FrequencyOutOfRange>;

    /// Set the duty cycle, scaled so that `u16::MAX` is 100 %
    fn set_duty_u16(&mut self, duty: u16);
}
