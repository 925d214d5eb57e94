//! Angle normalisation
//!
//! Every wraparound in the crate goes through these two closed-form
//! functions. Non-finite input maps to `0.0`.

use core::f32::consts::{PI, TAU};

/// Normalise an angle into `[0, 2π)`
pub fn normalize(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }

    let wrapped = angle % TAU;
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };

    // `-tiny + TAU` rounds to TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Normalise an angle difference into `(-π, π]`
pub fn normalize_signed(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    PI - normalize(PI - angle)
}

/// Angle of an offset vector, normalised into `[0, 2π)`
///
/// Screen coordinates: positive y points down, so angles grow clockwise
/// on the display.
pub fn heading(x: i16, y: i16) -> f32 {
    normalize(libm::atan2f(f32::from(y), f32::from(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        let diff = a - b;
        diff < 1e-4 && diff > -1e-4
    }

    #[test]
    fn test_normalize_range() {
        assert!(close(normalize(0.0), 0.0));
        assert!(close(normalize(TAU), 0.0));
        assert!(close(normalize(-PI / 2.0), 3.0 * PI / 2.0));
        assert!(close(normalize(5.0 * TAU + 1.0), 1.0));
        assert!(close(normalize(-5.0 * TAU - 1.0), TAU - 1.0));
    }

    #[test]
    fn test_normalize_signed_range() {
        assert!(close(normalize_signed(PI), PI));
        assert!(close(normalize_signed(-PI), PI));
        assert!(close(normalize_signed(3.0 * PI / 2.0), -PI / 2.0));
        assert!(close(normalize_signed(0.25), 0.25));
        assert!(close(normalize_signed(-0.25), -0.25));
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(normalize(f32::NAN), 0.0);
        assert_eq!(normalize(f32::INFINITY), 0.0);
        assert_eq!(normalize_signed(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_heading_quadrants() {
        assert!(close(heading(1, 0), 0.0));
        assert!(close(heading(0, 1), PI / 2.0));
        assert!(close(heading(-1, 0), PI));
        assert!(close(heading(0, -1), 3.0 * PI / 2.0));
        assert!(close(heading(0, 0), 0.0));
    }
}
