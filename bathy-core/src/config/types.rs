//! Configuration type definitions
//!
//! These types represent the device configuration. The firmware embeds a
//! `device.toml` at compile time and parses it with [`super::parse_config`];
//! every field falls back to the reference layout for a 128×64 display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::audio::beep_interval_ms;
use crate::geometry::Point;

/// Validation failures for a parsed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sweep period must be non-zero
    ZeroSweepPeriod,
    /// Radar radius must be non-zero
    ZeroRadius,
    /// Half-width must be finite and in `(0, π]`
    InvalidHalfWidth,
    /// Lock blink window must be non-zero
    ZeroBlink,
    /// Arrow size, wing angle and back ratio must be finite and positive
    InvalidArrow,
    /// Minimum interval is above the maximum
    InvertedIntervalClamp,
    /// Beep pulse width must be non-zero
    ZeroPulse,
    /// Beep pulse must end before the shortest interval starts the next one
    PulseTooLong,
    /// Baud rate must be non-zero
    ZeroBaudRate,
    /// Telemetry period must be non-zero
    ZeroTelemetryPeriod,
    /// Control cycle must be non-zero
    ZeroCycle,
}

/// Radar circle and sweep
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadarConfig {
    /// Radar center, display pixels
    pub center_x: i32,
    pub center_y: i32,
    /// Radar radius in pixels; detections beyond it are never shown
    pub radius: u16,
    /// Time for one full sweep revolution
    pub sweep_period_ms: u32,
    /// Angular half-width of the illuminated wedge (radians)
    pub sweep_half_width_rad: f32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            center_x: 32,
            center_y: 32,
            radius: 30,
            sweep_period_ms: 1000,
            sweep_half_width_rad: 0.6,
        }
    }
}

impl RadarConfig {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

/// Blinking lock mark on the radar rim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockConfig {
    /// Length of each on and off window
    pub blink_ms: u32,
    /// Side of the square mark in pixels
    pub mark_size: u8,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            blink_ms: 100,
            mark_size: 3,
        }
    }
}

/// Directional arrow glyph
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrowConfig {
    pub center_x: i32,
    pub center_y: i32,
    /// Distance from center to tip in pixels
    pub size: f32,
    /// Angle between the tip direction and each back vertex (radians)
    pub wing_rad: f32,
    /// Back vertex distance as a fraction of `size`
    pub back_ratio: f32,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            center_x: 100,
            center_y: 40,
            size: 12.0,
            wing_rad: 2.44,
            back_ratio: 0.7,
        }
    }
}

impl ArrowConfig {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

/// Beep cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioConfig {
    /// Interval before the distance term is added
    pub base_interval_ms: u32,
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
    /// How long each beep sounds
    pub pulse_ms: u32,
    /// Tone frequency before the rank term is added
    pub base_frequency_hz: u32,
    /// Frequency added per rank step
    pub frequency_step_hz: u32,
    /// Steady tone while button 1 is held
    pub manual_frequency_hz: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 100,
            min_interval_ms: 50,
            max_interval_ms: 1000,
            pulse_ms: 50,
            base_frequency_hz: 100,
            frequency_step_hz: 150,
            manual_frequency_hz: 262,
        }
    }
}

/// Serial link to the companion and host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    pub baud_rate: u32,
    /// Silence after which the link is reported stale
    pub timeout_ms: u32,
    /// Emit telemetry lines at all
    pub telemetry_enabled: bool,
    /// Minimum spacing between telemetry lines
    pub telemetry_period_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            timeout_ms: 3000,
            telemetry_enabled: true,
            telemetry_period_ms: 50,
        }
    }
}

/// Control loop pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopConfig {
    pub cycle_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { cycle_ms: 5 }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub radar: RadarConfig,
    pub lock: LockConfig,
    pub arrow: ArrowConfig,
    pub audio: AudioConfig,
    pub link: LinkConfig,
    pub control: LoopConfig,
}

impl DeviceConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radar = &self.radar;
        if radar.sweep_period_ms == 0 {
            return Err(ConfigError::ZeroSweepPeriod);
        }
        if radar.radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }
        let half_width = radar.sweep_half_width_rad;
        if !half_width.is_finite() || half_width <= 0.0 || half_width > core::f32::consts::PI {
            return Err(ConfigError::InvalidHalfWidth);
        }

        if self.lock.blink_ms == 0 {
            return Err(ConfigError::ZeroBlink);
        }

        let arrow = &self.arrow;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(arrow.size) || !positive(arrow.wing_rad) || !positive(arrow.back_ratio) {
            return Err(ConfigError::InvalidArrow);
        }

        let audio = &self.audio;
        if audio.min_interval_ms > audio.max_interval_ms {
            return Err(ConfigError::InvertedIntervalClamp);
        }
        if audio.pulse_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }
        if audio.pulse_ms >= beep_interval_ms(0, audio) {
            return Err(ConfigError::PulseTooLong);
        }

        if self.link.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if self.link.telemetry_period_ms == 0 {
            return Err(ConfigError::ZeroTelemetryPeriod);
        }

        if self.control.cycle_ms == 0 {
            return Err(ConfigError::ZeroCycle);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(DeviceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_reference_constants() {
        let config = DeviceConfig::default();
        assert_eq!(config.radar.sweep_period_ms, 1000);
        assert_eq!(config.radar.sweep_half_width_rad, 0.6);
        assert_eq!(config.lock.blink_ms, 100);
        assert_eq!(config.arrow.wing_rad, 2.44);
        assert_eq!(config.audio.pulse_ms, 50);
        assert_eq!(config.control.cycle_ms, 5);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = DeviceConfig::default();
        config.radar.sweep_period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSweepPeriod));

        let mut config = DeviceConfig::default();
        config.radar.sweep_half_width_rad = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHalfWidth));

        let mut config = DeviceConfig::default();
        config.audio.min_interval_ms = 2000;
        assert_eq!(config.validate(), Err(ConfigError::InvertedIntervalClamp));

        let mut config = DeviceConfig::default();
        config.arrow.back_ratio = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidArrow));

        let mut config = DeviceConfig::default();
        config.control.cycle_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCycle));
    }

    #[test]
    fn test_pulse_must_fit_shortest_interval() {
        // Clamped up to min_interval_ms = 50, same as the pulse
        let mut config = DeviceConfig::default();
        config.audio.base_interval_ms = 10;
        assert_eq!(config.validate(), Err(ConfigError::PulseTooLong));

        config.audio.pulse_ms = 40;
        assert_eq!(config.validate(), Ok(()));

        let mut config = DeviceConfig::default();
        config.audio.pulse_ms = 100;
        assert_eq!(config.validate(), Err(ConfigError::PulseTooLong));
    }
}
