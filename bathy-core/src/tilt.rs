//! Roll and pitch from a 3-axis accelerometer
//!
//! The rod's tilt is sent to the host as telemetry. Only the direction
//! of the gravity vector matters, so raw counts work at any range setting.

use core::f32::consts::PI;

/// Rod tilt in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    pub roll_deg: f32,
    pub pitch_deg: f32,
}

impl Tilt {
    /// Compute tilt from raw axis readings
    ///
    /// `roll = atan2(y, z)`, `pitch = atan2(-x, sqrt(y² + z²))`.
    pub fn from_axes(x: i16, y: i16, z: i16) -> Self {
        let (x, y, z) = (f32::from(x), f32::from(y), f32::from(z));
        let roll = libm::atan2f(y, z);
        let pitch = libm::atan2f(-x, libm::sqrtf(y * y + z * z));
        Self {
            roll_deg: roll * 180.0 / PI,
            pitch_deg: pitch * 180.0 / PI,
        }
    }
}
