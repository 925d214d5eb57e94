//! Property tests for the sonar line decoder and line assembler

use bathy_protocol::{decode_line, Detection, LineAssembler, NavigationState, MAX_DETECTIONS};
use proptest::prelude::*;

fn any_nav() -> impl Strategy<Value = NavigationState> {
    (0.0f32..100.0, any::<u16>(), any::<i16>(), any::<i16>()).prop_map(|(d, c, x, y)| {
        NavigationState {
            target_distance: d,
            active_count: c,
            nav_offset_x: x,
            nav_offset_y: y,
        }
    })
}

fn any_detection() -> impl Strategy<Value = Detection> {
    (any::<i16>(), any::<i16>(), 1u8..=255, 1u8..=255)
        .prop_map(|(x, y, size, rank)| Detection::new(x, y, size, rank))
}

proptest! {
    #[test]
    fn decoder_never_panics(line in ".{0,300}", previous in any_nav()) {
        let _ = decode_line(&line, &previous);
    }

    #[test]
    fn lines_without_prefix_are_rejected(line in "[^S\\s].{0,80}", previous in any_nav()) {
        prop_assert!(decode_line(&line, &previous).is_err());
    }

    #[test]
    fn well_formed_lines_decode_every_entry(
        previous in any_nav(),
        next in any_nav(),
        detections in proptest::collection::vec(any_detection(), 1..MAX_DETECTIONS),
    ) {
        let mut line = format!(
            "S:{:.1},{},{},{}|",
            next.target_distance, next.active_count, next.nav_offset_x, next.nav_offset_y
        );
        let entries: Vec<String> = detections
            .iter()
            .map(|d| format!("{},{},{},{}", d.offset_x, d.offset_y, d.size, d.rank))
            .collect();
        line.push_str(&entries.join(":"));

        let update = decode_line(&line, &previous).unwrap();
        prop_assert_eq!(update.detections.as_slice(), detections.as_slice());
        prop_assert_eq!(update.nav.active_count, next.active_count);
        prop_assert_eq!(update.nav.nav_offset_x, next.nav_offset_x);
        prop_assert_eq!(update.nav.nav_offset_y, next.nav_offset_y);
        prop_assert_eq!(update.skipped, 0);
    }

    #[test]
    fn garbage_entries_only_cost_themselves(
        good in proptest::collection::vec(any_detection(), 0..8),
        garbage in proptest::collection::vec("[a-z]{1,6}", 0..8),
    ) {
        let mut entries: Vec<String> = good
            .iter()
            .map(|d| format!("{},{},{},{}", d.offset_x, d.offset_y, d.size, d.rank))
            .collect();
        entries.extend(garbage.iter().cloned());
        if entries.is_empty() {
            entries.push("OUT".to_string());
        }
        let line = format!("S:1.0,1|{}", entries.join(":"));

        let update = decode_line(&line, &NavigationState::default()).unwrap();
        prop_assert_eq!(update.detections.as_slice(), good.as_slice());
        prop_assert_eq!(usize::from(update.skipped), garbage.len());
    }

    #[test]
    fn assembler_never_yields_terminators(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let mut assembler = LineAssembler::new();
        for byte in bytes {
            if let Ok(Some(line)) = assembler.feed(byte) {
                prop_assert!(!line.is_empty());
                prop_assert!(!line.contains('\n'));
                prop_assert!(!line.contains('\r'));
            }
        }
    }
}
