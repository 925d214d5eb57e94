//! Target ranker
//!
//! Picks the raw detection nearest the radar center. Afterglow entries
//! are never ranked.

use bathy_protocol::Detection;

/// Nearest-target summary shared by the lock mark and the beeper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetRank {
    /// Squared pixel distance of the nearest detection
    pub nearest_distance_sq: u32,
    /// Rank of the nearest detection; `0` means no target
    pub nearest_rank: u8,
}

impl TargetRank {
    /// No target ranked
    pub const NONE: Self = Self {
        nearest_distance_sq: 0,
        nearest_rank: 0,
    };

    pub fn is_ranked(&self) -> bool {
        self.nearest_rank > 0
    }
}

/// Nearest detection, first one wins on ties
pub fn nearest(detections: &[Detection]) -> Option<&Detection> {
    detections.iter().min_by_key(|d| d.distance_sq())
}

/// Rank the raw detection set
pub fn rank_targets(detections: &[Detection]) -> TargetRank {
    match nearest(detections) {
        Some(detection) => TargetRank {
            nearest_distance_sq: detection.distance_sq(),
            nearest_rank: detection.rank,
        },
        None => TargetRank::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_sentinel() {
        assert_eq!(rank_targets(&[]), TargetRank::NONE);
        assert!(!rank_targets(&[]).is_ranked());
    }

    #[test]
    fn test_nearest_wins() {
        let rank = rank_targets(&[Detection::new(3, 4, 1, 2), Detection::new(1, 0, 1, 5)]);
        assert_eq!(rank.nearest_distance_sq, 1);
        assert_eq!(rank.nearest_rank, 5);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let set = [
            Detection::new(0, 5, 1, 3),
            Detection::new(5, 0, 1, 4),
            Detection::new(-3, 4, 1, 2),
        ];
        assert_eq!(nearest(&set), Some(&set[0]));
        assert_eq!(rank_targets(&set).nearest_rank, 3);
    }
}
