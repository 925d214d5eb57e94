//! Screen-space points

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pixel position on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a detection-style pixel offset
    pub fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + i32::from(dx),
            y: self.y + i32::from(dy),
        }
    }

    /// Point at `length` pixels from `self` along `angle` (radians)
    ///
    /// Coordinates are rounded to the nearest pixel.
    pub fn polar(self, length: f32, angle: f32) -> Self {
        let dx = libm::roundf(length * libm::cosf(angle));
        let dy = libm::roundf(length * libm::sinf(angle));
        Self {
            x: self.x + dx as i32,
            y: self.y + dy as i32,
        }
    }
}
