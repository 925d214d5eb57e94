//! Companion line source trait

/// Non-blocking source of complete protocol lines
pub trait LineSource {
    /// Return the next complete line if one is available
    ///
    /// Must return immediately whether or not data is pending. The line
    /// is valid until the next call.
    fn poll_line(&mut self) -> Option<&str>;
}
