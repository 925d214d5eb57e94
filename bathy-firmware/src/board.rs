//! RP2040 implementations of the Bathy HAL traits
//!
//! Thin wrappers tying embassy-rp peripherals to the board-agnostic
//! traits the drivers and core are written against.

use embassy_rp::gpio::Input;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error as UartError};
use embassy_time::Instant;

use bathy_core::traits::Clock;
use bathy_hal::pwm::{FrequencyOutOfRange, PwmOutput};
use bathy_hal::uart::{SerialRx, SerialTx};
use bathy_hal::InputPin;

/// System clock feeding the PWM slices
const SYS_CLOCK_HZ: u32 = 125_000_000;
/// PWM clock divider; gives a tone range of about 30 Hz to 1 MHz
const PWM_DIVIDER: u8 = 64;
const PWM_TICK_HZ: u32 = SYS_CLOCK_HZ / PWM_DIVIDER as u32;

/// Push button input
pub struct Button(Input<'static>);

impl Button {
    pub fn new(input: Input<'static>) -> Self {
        Self(input)
    }
}

impl InputPin for Button {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Buzzer PWM on channel B of a slice
pub struct RpPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
    duty: u16,
}

impl RpPwm {
    /// Take over a slice, starting silent
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = PWM_DIVIDER.into();
        config.top = u16::MAX;
        config.compare_b = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            duty: 0,
        }
    }

    fn apply(&mut self) {
        let period = u32::from(self.config.top) + 1;
        self.config.compare_b = (period * u32::from(self.duty) / 65536) as u16;
        self.pwm.set_config(&self.config);
    }
}

impl PwmOutput for RpPwm {
    fn set_frequency(&mut self, hz: u32) -> Result<(), FrequencyOutOfRange> {
        let top = PWM_TICK_HZ
            .checked_div(hz)
            .and_then(|ticks| ticks.checked_sub(1))
            .filter(|top| (1..=u32::from(u16::MAX)).contains(top))
            .ok_or(FrequencyOutOfRange { requested_hz: hz })?;

        self.config.top = top as u16;
        self.apply();
        Ok(())
    }

    fn set_duty_u16(&mut self, duty: u16) {
        self.duty = duty;
        self.apply();
    }
}

/// Non-blocking receive half of the buffered UART
pub struct UartRx(BufferedUartRx);

impl UartRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self(rx)
    }
}

impl SerialRx for UartRx {
    type Error = UartError;

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !embedded_io::ReadReady::read_ready(&mut self.0)? {
            return Ok(0);
        }
        embedded_io::Read::read(&mut self.0, buf)
    }
}

/// Transmit half of the buffered UART
///
/// Writes only block when the ring buffer is full.
pub struct UartTx(BufferedUartTx);

impl UartTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self(tx)
    }
}

impl SerialTx for UartTx {
    type Error = UartError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_io::Write::write_all(&mut self.0, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        embedded_io::Write::flush(&mut self.0)
    }
}

/// Millisecond clock since boot, wrapping at `u32::MAX`
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}
