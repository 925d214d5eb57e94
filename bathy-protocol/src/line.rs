//! Line assembly for the companion byte stream
//!
//! Bytes arrive in arbitrary chunks. The assembler collects them until a
//! `\r` or `\n` and hands out the completed line. A line that overflows the
//! buffer is thrown away up to the next terminator so a partial line is
//! never delivered.

use heapless::Vec;

/// Maximum accepted line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 256;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblyError {
    /// Line exceeded [`MAX_LINE_LEN`]; skipping to the next terminator
    LineTooLong,
    /// Completed line is not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblyState {
    /// Appending bytes to the current line
    Collecting,
    /// Dropping bytes of an overlong line
    Discarding,
    /// A line was handed out; clear before the next byte
    Complete,
}

/// State machine turning a byte stream into lines
#[derive(Debug, Clone)]
pub struct LineAssembler {
    state: AssemblyState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Create a new line assembler
    pub fn new() -> Self {
        Self {
            state: AssemblyState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Reset the assembler state
    pub fn reset(&mut self) {
        self.state = AssemblyState::Collecting;
        self.buffer.clear();
    }

    /// The line completed by the last [`Self::feed`], if any
    pub fn line(&self) -> Option<&str> {
        match self.state {
            AssemblyState::Complete => core::str::from_utf8(&self.buffer).ok(),
            AssemblyState::Collecting | AssemblyState::Discarding => None,
        }
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` when more bytes are needed, or `Err` when a line
    /// had to be dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&str>, AssemblyError> {
        if self.state == AssemblyState::Complete {
            self.buffer.clear();
            self.state = AssemblyState::Collecting;
        }

        let terminator = byte == b'\n' || byte == b'\r';

        match self.state {
            AssemblyState::Collecting => {
                if terminator {
                    if self.buffer.is_empty() {
                        // Blank line or the second half of "\r\n"
                        return Ok(None);
                    }
                    self.state = AssemblyState::Complete;
                    return core::str::from_utf8(&self.buffer)
                        .map(Some)
                        .map_err(|_| AssemblyError::InvalidUtf8);
                }

                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = AssemblyState::Discarding;
                    return Err(AssemblyError::LineTooLong);
                }
                Ok(None)
            }
            AssemblyState::Discarding => {
                if terminator {
                    self.state = AssemblyState::Collecting;
                }
                Ok(None)
            }
            AssemblyState::Complete => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed bytes until the first line, copying it out
    fn first_line(assembler: &mut LineAssembler, bytes: &[u8]) -> Option<heapless::String<64>> {
        for &byte in bytes {
            if let Ok(Some(line)) = assembler.feed(byte) {
                let mut out = heapless::String::new();
                out.push_str(line).ok()?;
                return Some(out);
            }
        }
        None
    }

    #[test]
    fn test_line_completes_on_newline() {
        let mut assembler = LineAssembler::new();
        let line = first_line(&mut assembler, b"S:1.0,0|OUT\n").unwrap();
        assert_eq!(line.as_str(), "S:1.0,0|OUT");
    }

    #[test]
    fn test_crlf_yields_one_line() {
        let mut assembler = LineAssembler::new();
        let mut lines = 0;
        for &byte in b"S:1.0,0|OUT\r\nS:2.0,0|OUT\r\n" {
            if let Ok(Some(_)) = assembler.feed(byte) {
                lines += 1;
            }
        }
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_partial_line_is_held() {
        let mut assembler = LineAssembler::new();
        assert!(first_line(&mut assembler, b"S:1.0").is_none());
        assert_eq!(assembler.buffer.as_slice(), b"S:1.0");

        let line = first_line(&mut assembler, b",0|OUT\n").unwrap();
        assert_eq!(line.as_str(), "S:1.0,0|OUT");
        assert_eq!(assembler.line(), Some("S:1.0,0|OUT"));

        assert_eq!(assembler.feed(b'S'), Ok(None));
        assert_eq!(assembler.line(), None);
    }

    #[test]
    fn test_overlong_line_resyncs() {
        let mut assembler = LineAssembler::new();
        let mut saw_overflow = false;
        for _ in 0..MAX_LINE_LEN + 10 {
            if assembler.feed(b'x') == Err(AssemblyError::LineTooLong) {
                saw_overflow = true;
            }
        }
        assert!(saw_overflow);

        // Tail of the overlong line is dropped, the next line survives
        let line = first_line(&mut assembler, b"xxx\nS:1.0,0|OUT\n").unwrap();
        assert_eq!(line.as_str(), "S:1.0,0|OUT");
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let mut assembler = LineAssembler::new();
        assert_eq!(assembler.feed(0xFF), Ok(None));
        assert_eq!(assembler.feed(b'\n'), Err(AssemblyError::InvalidUtf8));

        let line = first_line(&mut assembler, b"ok\n").unwrap();
        assert_eq!(line.as_str(), "ok");
    }
}
