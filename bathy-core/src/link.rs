//! Companion link health
//!
//! Tracks the time since the last successfully decoded line. A stale link
//! is only reported; radar state is kept as it was.

/// Link health counters
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    /// Silence after which the link counts as stale
    timeout_ms: u32,
    /// Timestamp of the last applied line
    last_rx_ms: Option<u32>,
    /// Lines applied since boot
    applied: u32,
    /// Lines rejected since boot
    rejected: u32,
}

impl LinkMonitor {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            last_rx_ms: None,
            applied: 0,
            rejected: 0,
        }
    }

    /// Record a line that decoded and was applied
    pub fn line_applied(&mut self, now_ms: u32) {
        self.last_rx_ms = Some(now_ms);
        self.applied = self.applied.wrapping_add(1);
    }

    /// Record a line that was rejected
    ///
    /// Rejections do not refresh the link; a companion sending only
    /// garbage still goes stale.
    pub fn line_rejected(&mut self) {
        self.rejected = self.rejected.wrapping_add(1);
    }

    /// Check if the link is stale at `now_ms`
    ///
    /// The link is stale until the first line arrives.
    pub fn is_stale(&self, now_ms: u32) -> bool {
        match self.last_rx_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.timeout_ms,
            None => true,
        }
    }

    pub fn applied(&self) -> u32 {
        self.applied
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_before_first_line() {
        let monitor = LinkMonitor::new(3000);
        assert!(monitor.is_stale(0));
    }

    #[test]
    fn test_timeout() {
        let mut monitor = LinkMonitor::new(3000);
        monitor.line_applied(1000);
        assert!(!monitor.is_stale(1000));
        assert!(!monitor.is_stale(3999));
        assert!(monitor.is_stale(4000));

        monitor.line_applied(4100);
        assert!(!monitor.is_stale(4200));
        assert_eq!(monitor.applied(), 2);
    }

    #[test]
    fn test_rejections_do_not_refresh() {
        let mut monitor = LinkMonitor::new(3000);
        monitor.line_applied(0);
        monitor.line_rejected();
        monitor.line_rejected();
        assert!(monitor.is_stale(3000));
        assert_eq!(monitor.rejected(), 2);
    }
}
