//! Radar engine
//!
//! Sweep tracking with afterglow, nearest-target ranking and the
//! navigation geometry derived from the companion's nav offset.

pub mod afterglow;
pub mod nav;
pub mod ranker;
pub mod sweep;

pub use afterglow::{Afterglow, AFTERGLOW_CAPACITY};
pub use nav::{
    arrow_vertices, lock_blink_on, lock_mark, nav_angle, nav_indicator, ArrowGlyph, NavIndicator,
};
pub use ranker::{nearest, rank_targets, TargetRank};
pub use sweep::{in_range, is_illuminated, sweep_angle, SweepTracker};
