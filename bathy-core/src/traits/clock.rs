//! Monotonic time source

/// Monotonic millisecond clock
///
/// The value wraps after about 49 days; consumers compare timestamps with
/// `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
