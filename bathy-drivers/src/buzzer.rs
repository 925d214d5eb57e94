//! PWM piezo buzzer
//!
//! Square wave at the requested pitch; duty 0 is silence.

use bathy_core::traits::ToneOutput;
use bathy_hal::pwm::{PwmOutput, DUTY_HALF};

/// Lowest pitch the buzzer is driven at
pub const MIN_FREQUENCY_HZ: u32 = 20;

/// Highest pitch the buzzer is driven at
pub const MAX_FREQUENCY_HZ: u32 = 20_000;

/// Piezo buzzer on a PWM channel
pub struct PwmBuzzer<P> {
    pwm: P,
    /// Frequency currently playing
    playing: Option<u32>,
}

impl<P: PwmOutput> PwmBuzzer<P> {
    /// Create a new buzzer; the output starts silent
    pub fn new(pwm: P) -> Self {
        let mut buzzer = Self { pwm, playing: None };
        buzzer.pwm.set_duty_u16(0);
        buzzer
    }

    /// Frequency currently playing, if any
    pub fn frequency(&self) -> Option<u32> {
        self.playing
    }
}

impl<P: PwmOutput> ToneOutput for PwmBuzzer<P> {
    fn start(&mut self, frequency_hz: u32) {
        let frequency_hz = frequency_hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ);
        if self.playing == Some(frequency_hz) {
            return;
        }

        if self.pwm.set_frequency(frequency_hz).is_err() {
            // Unsupported pitch, output left as it was
            return;
        }
        self.playing = Some(frequency_hz);
        self.pwm.set_duty_u16(DUTY_HALF);
    }

    fn stop(&mut self) {
        if self.playing.take().is_some() {
            self.pwm.set_duty_u16(0);
        }
    }

    fn is_sounding(&self) -> bool {
        self.playing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathy_hal::pwm::FrequencyOutOfRange;

    /// Mock PWM channel for testing
    struct MockPwm {
        frequency: u32,
        duty: u16,
        writes: u32,
        max_hz: u32,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                frequency: 0,
                duty: 1,
                writes: 0,
                max_hz: u32::MAX,
            }
        }
    }

    impl PwmOutput for MockPwm {
        fn set_frequency(&mut self, hz: u32) -> Result<(), FrequencyOutOfRange> {
            if hz > self.max_hz {
                return Err(FrequencyOutOfRange { requested_hz: hz });
            }
            self.frequency = hz;
            self.writes += 1;
            Ok(())
        }

        fn set_duty_u16(&mut self, duty: u16) {
            self.duty = duty;
            self.writes += 1;
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = PwmBuzzer::new(MockPwm::new());
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.pwm.duty, 0);
    }

    #[test]
    fn test_start_and_stop() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new());
        buzzer.start(400);
        assert_eq!(buzzer.frequency(), Some(400));
        assert_eq!(buzzer.pwm.frequency, 400);
        assert_eq!(buzzer.pwm.duty, DUTY_HALF);

        buzzer.stop();
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.pwm.duty, 0);
    }

    #[test]
    fn test_idempotent() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new());
        buzzer.start(250);
        let writes = buzzer.pwm.writes;
        buzzer.start(250);
        assert_eq!(buzzer.pwm.writes, writes);

        buzzer.stop();
        let writes = buzzer.pwm.writes;
        buzzer.stop();
        assert_eq!(buzzer.pwm.writes, writes);
    }

    #[test]
    fn test_frequency_is_clamped() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new());
        buzzer.start(1);
        assert_eq!(buzzer.frequency(), Some(MIN_FREQUENCY_HZ));
        buzzer.start(100_000);
        assert_eq!(buzzer.frequency(), Some(MAX_FREQUENCY_HZ));
    }

    #[test]
    fn test_unsupported_frequency_stays_silent() {
        let mut pwm = MockPwm::new();
        pwm.max_hz = 1000;
        let mut buzzer = PwmBuzzer::new(pwm);
        buzzer.start(2000);
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.pwm.duty, 0);
    }
}
