//! Sweep tracker
//!
//! The sweep angle is derived from the clock every cycle:
//! `(now mod period) / period * 2π`. A detection is illuminated while
//! its angle is within the half-width of the sweep line.
//!
//! Per cycle update:
//! 1. afterglow entries the sweep illuminates now are dropped
//! 2. raw detections the sweep illuminates now and that lie inside the
//!    radar radius are (re)inserted
//!
//! Entries outside the illuminated wedge are untouched, so the display
//! changes in wedges that follow the sweep line.

use core::f32::consts::TAU;

use bathy_protocol::Detection;

use super::afterglow::Afterglow;
use crate::angle::{heading, normalize_signed};
use crate::config::RadarConfig;
use crate::geometry::Point;

/// Sweep angle in `[0, 2π)` at `now_ms`
pub fn sweep_angle(now_ms: u32, period_ms: u32) -> f32 {
    let period = period_ms.max(1);
    (now_ms % period) as f32 / period as f32 * TAU
}

/// Check if a detection at `detection_angle` is inside the sweep wedge
pub fn is_illuminated(detection_angle: f32, sweep_angle: f32, half_width: f32) -> bool {
    let diff = normalize_signed(detection_angle - sweep_angle);
    diff <= half_width && diff >= -half_width
}

/// Check if a detection lies inside the radar circle
pub fn in_range(detection: &Detection, radius: u16) -> bool {
    let radius = u32::from(radius);
    detection.distance_sq() <= radius * radius
}

/// Rotating sweep and the afterglow it leaves behind
#[derive(Debug, Clone)]
pub struct SweepTracker {
    config: RadarConfig,
    angle: f32,
    afterglow: Afterglow,
}

impl SweepTracker {
    pub fn new(config: RadarConfig) -> Self {
        Self {
            config,
            angle: 0.0,
            afterglow: Afterglow::new(),
        }
    }

    /// Advance the sweep to `now_ms` and recompute the afterglow set
    pub fn update(&mut self, now_ms: u32, raw: &[Detection]) {
        let angle = sweep_angle(now_ms, self.config.sweep_period_ms);
        let half_width = self.config.sweep_half_width_rad;
        self.angle = angle;

        self.afterglow
            .retain(|d| !is_illuminated(heading(d.offset_x, d.offset_y), angle, half_width));

        for detection in raw {
            if in_range(detection, self.config.radius)
                && is_illuminated(
                    heading(detection.offset_x, detection.offset_y),
                    angle,
                    half_width,
                )
            {
                self.afterglow.insert(*detection);
            }
        }
    }

    /// Current sweep angle in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Outer end of the sweep line on screen
    pub fn sweep_end(&self) -> Point {
        self.config
            .center()
            .polar(f32::from(self.config.radius), self.angle)
    }

    /// Detections to render this frame
    pub fn rendered(&self) -> &[Detection] {
        self.afterglow.as_slice()
    }

    pub fn afterglow(&self) -> &Afterglow {
        &self.afterglow
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    fn close(a: f32, b: f32) -> bool {
        let diff = a - b;
        diff < 1e-4 && diff > -1e-4
    }

    fn tracker() -> SweepTracker {
        SweepTracker::new(RadarConfig::default())
    }

    #[test]
    fn test_sweep_angle_from_time() {
        assert!(close(sweep_angle(0, 1000), 0.0));
        assert!(close(sweep_angle(250, 1000), PI / 2.0));
        assert!(close(sweep_angle(1500, 1000), PI));
        assert!(close(sweep_angle(999, 1000), TAU * 0.999));
    }

    #[test]
    fn test_illumination_at_and_opposite_sweep() {
        for &sweep in &[0.0, 1.0, PI, 6.0] {
            assert!(is_illuminated(sweep, sweep, 0.6));
            assert!(!is_illuminated(crate::angle::normalize(sweep + PI), sweep, 0.6));
        }
    }

    #[test]
    fn test_illumination_across_wrap() {
        assert!(is_illuminated(0.1, TAU - 0.1, 0.6));
        assert!(is_illuminated(TAU - 0.1, 0.1, 0.6));
        assert!(!is_illuminated(0.7, TAU - 0.1, 0.6));
    }

    #[test]
    fn test_sweep_end_on_rim() {
        let mut tracker = tracker();
        tracker.update(0, &[]);
        assert_eq!(tracker.sweep_end(), Point::new(62, 32));
        tracker.update(250, &[]);
        assert_eq!(tracker.sweep_end(), Point::new(32, 62));
    }

    #[test]
    fn test_illuminated_raw_detection_is_added() {
        let mut tracker = tracker();
        // Angle 0: straight right
        tracker.update(0, &[Detection::new(10, 0, 1, 1), Detection::new(-10, 0, 1, 1)]);
        assert_eq!(tracker.rendered(), &[Detection::new(10, 0, 1, 1)]);
    }

    #[test]
    fn test_out_of_range_never_added() {
        let mut tracker = tracker();
        tracker.update(0, &[Detection::new(31, 0, 1, 1), Detection::new(30, 0, 1, 1)]);
        assert_eq!(tracker.rendered(), &[Detection::new(30, 0, 1, 1)]);
    }

    #[test]
    fn test_afterglow_outlives_raw_until_next_pass() {
        let mut tracker = tracker();
        let target = Detection::new(10, 0, 1, 1);
        tracker.update(0, &[target]);
        assert_eq!(tracker.rendered(), &[target]);

        // Raw set cleared, sweep elsewhere: still glowing
        for now in (200..=800).step_by(5) {
            tracker.update(now, &[]);
            assert_eq!(tracker.rendered(), &[target], "dropped early at {now} ms");
        }

        // Next pass drops it
        tracker.update(1000, &[]);
        assert!(tracker.rendered().is_empty());
    }

    #[test]
    fn test_refreshed_detection_persists_across_passes() {
        let mut tracker = tracker();
        let target = Detection::new(0, 10, 1, 1);
        for now in (0..3000).step_by(5) {
            tracker.update(now, &[target]);
        }
        // Drop and re-insert happen in the same update
        assert_eq!(tracker.rendered(), &[target]);
    }
}
