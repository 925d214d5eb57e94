//! UART serial communication abstractions
//!
//! The control loop may never wait on the serial link, so the receive side
//! is a poll: it hands back whatever bytes are already buffered and returns
//! immediately when there are none.

/// Non-blocking UART receiver
pub trait SerialRx {
    /// Error type for receive operations
    type Error;

    /// Copy already-received bytes into `buf`
    ///
    /// Returns the number of bytes copied, which is `0` when nothing is
    /// pending. Must never wait for data to arrive.
    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single pending byte, if any
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.try_read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// UART transmitter
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Queue data for transmission
    ///
    /// Implementations backed by a TX ring buffer return as soon as the data
    /// is queued.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}
