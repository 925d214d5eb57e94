//! Navigation geometry
//!
//! Pure functions turning the decoded nav offset into screen positions:
//! the blinking lock mark on the radar rim and the directional arrow.
//! Both use the companion's nav offset, not the locally nearest raw
//! detection.

use bathy_protocol::NavigationState;

use super::ranker::TargetRank;
use crate::angle::heading;
use crate::config::{ArrowConfig, LockConfig, RadarConfig};
use crate::geometry::Point;

/// Triangle outline of the directional arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArrowGlyph {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

/// What the navigation corner shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavIndicator {
    /// Arrow toward the companion's best target
    Arrow(ArrowGlyph),
    /// No fish active; a `?` is drawn at the arrow center
    Placeholder(Point),
}

/// Angle of the nav offset in `[0, 2π)`
pub fn nav_angle(nav: &NavigationState) -> f32 {
    heading(nav.nav_offset_x, nav.nav_offset_y)
}

/// Arrow vertices for `angle`
///
/// Tip at `size` along `angle`; back vertices at `back_ratio * size`
/// along `angle ± wing`.
pub fn arrow_vertices(center: Point, angle: f32, config: &ArrowConfig) -> ArrowGlyph {
    let back = config.size * config.back_ratio;
    ArrowGlyph {
        tip: center.polar(config.size, angle),
        left: center.polar(back, angle - config.wing_rad),
        right: center.polar(back, angle + config.wing_rad),
    }
}

/// Arrow when fish are active, placeholder otherwise
pub fn nav_indicator(nav: &NavigationState, config: &ArrowConfig) -> NavIndicator {
    if nav.has_targets() {
        NavIndicator::Arrow(arrow_vertices(config.center(), nav_angle(nav), config))
    } else {
        NavIndicator::Placeholder(config.center())
    }
}

/// Check if the lock mark is in an "on" window
pub fn lock_blink_on(now_ms: u32, blink_ms: u32) -> bool {
    (now_ms / blink_ms.max(1)) % 2 == 0
}

/// Lock mark position on the radar rim, if it is drawn this frame
pub fn lock_mark(
    now_ms: u32,
    nav: &NavigationState,
    rank: &TargetRank,
    radar: &RadarConfig,
    lock: &LockConfig,
) -> Option<Point> {
    if !rank.is_ranked() || !lock_blink_on(now_ms, lock.blink_ms) {
        return None;
    }
    Some(radar.center().polar(f32::from(radar.radius), nav_angle(nav)))
}
