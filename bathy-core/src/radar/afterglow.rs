//! Afterglow set
//!
//! Detections stay here after the sweep illuminates them and are dropped
//! the next time the sweep passes their angle, unless fresh raw data
//! puts them back in the same pass.

use heapless::Vec;

use bathy_protocol::Detection;

/// Maximum detections kept in afterglow
pub const AFTERGLOW_CAPACITY: usize = 32;

/// Fixed-capacity, insertion-ordered set of rendered detections
#[derive(Debug, Clone, Default)]
pub struct Afterglow {
    entries: Vec<Detection, AFTERGLOW_CAPACITY>,
    evicted: u32,
}

impl Afterglow {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            evicted: 0,
        }
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, keep: impl FnMut(&Detection) -> bool) {
        self.entries.retain(keep);
    }

    /// Append a detection, evicting the oldest entry when full
    pub fn insert(&mut self, detection: Detection) {
        if self.entries.is_full() {
            self.entries.remove(0);
            self.evicted = self.evicted.wrapping_add(1);
        }
        // Cannot fail, a slot was freed above
        let _ = self.entries.push(detection);
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped for capacity since creation
    pub fn evicted(&self) -> u32 {
        self.evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut glow = Afterglow::new();
        glow.insert(Detection::new(1, 0, 1, 1));
        glow.insert(Detection::new(2, 0, 1, 1));
        assert_eq!(
            glow.as_slice(),
            &[Detection::new(1, 0, 1, 1), Detection::new(2, 0, 1, 1)]
        );
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut glow = Afterglow::new();
        for i in 0..(AFTERGLOW_CAPACITY as i16 + 2) {
            glow.insert(Detection::new(i, 0, 1, 1));
        }
        assert_eq!(glow.len(), AFTERGLOW_CAPACITY);
        assert_eq!(glow.evicted(), 2);
        assert_eq!(glow.as_slice()[0], Detection::new(2, 0, 1, 1));
    }

    #[test]
    fn test_retain() {
        let mut glow = Afterglow::new();
        glow.insert(Detection::new(1, 0, 1, 1));
        glow.insert(Detection::new(-1, 0, 1, 1));
        glow.retain(|d| d.offset_x > 0);
        assert_eq!(glow.as_slice(), &[Detection::new(1, 0, 1, 1)]);
    }
}
