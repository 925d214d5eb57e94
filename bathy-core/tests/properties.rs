//! Property tests for the radar engine

use core::f32::consts::{PI, TAU};

use bathy_core::angle::{normalize, normalize_signed};
use bathy_core::audio::beep_interval_ms;
use bathy_core::config::AudioConfig;
use bathy_core::radar::{is_illuminated, nearest, rank_targets, sweep_angle};
use bathy_core::Detection;
use proptest::prelude::*;

fn any_detection() -> impl Strategy<Value = Detection> {
    (-100i16..100, -100i16..100, 1u8..=8, 1u8..=5)
        .prop_map(|(x, y, size, rank)| Detection::new(x, y, size, rank))
}

proptest! {
    #[test]
    fn normalize_stays_in_range(angle in -1.0e6f32..1.0e6) {
        let wrapped = normalize(angle);
        prop_assert!((0.0..TAU).contains(&wrapped));
    }

    #[test]
    fn normalize_signed_stays_in_range(angle in -1.0e6f32..1.0e6) {
        let wrapped = normalize_signed(angle);
        prop_assert!(wrapped > -PI && wrapped <= PI);
    }

    #[test]
    fn sweep_angle_stays_in_range(now in any::<u32>(), period in 1u32..100_000) {
        let angle = sweep_angle(now, period);
        prop_assert!((0.0..TAU).contains(&angle));
    }

    #[test]
    fn sweep_always_illuminates_its_own_angle(now in any::<u32>()) {
        let angle = sweep_angle(now, 1000);
        prop_assert!(is_illuminated(angle, angle, 0.6));
        prop_assert!(!is_illuminated(normalize(angle + PI), angle, 0.6));
    }

    #[test]
    fn beep_interval_is_monotone_and_clamped(a in any::<u32>(), b in any::<u32>()) {
        let config = AudioConfig::default();
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_interval = beep_interval_ms(near, &config);
        let far_interval = beep_interval_ms(far, &config);

        prop_assert!(near_interval <= far_interval);
        prop_assert!((50..=1000).contains(&near_interval));
        prop_assert!((50..=1000).contains(&far_interval));
    }

    #[test]
    fn ranker_returns_first_minimum(set in proptest::collection::vec(any_detection(), 0..16)) {
        let rank = rank_targets(&set);
        match set.iter().map(|d| d.distance_sq()).min() {
            None => prop_assert_eq!(rank.nearest_rank, 0),
            Some(min) => {
                let first = set.iter().position(|d| d.distance_sq() == min).unwrap();
                prop_assert_eq!(nearest(&set), Some(&set[first]));
                prop_assert_eq!(rank.nearest_distance_sq, min);
                prop_assert_eq!(rank.nearest_rank, set[first].rank);
            }
        }
    }
}
