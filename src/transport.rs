//! Byte sink towards the LED controller board

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The link could not be opened or was lost
    #[error("transport unavailable")]
    Unavailable,
    /// The bounded write timeout expired before anything was written
    #[error("write timed out")]
    Timeout,
}

/// Serial link to the controller board
///
/// Implement this trait for the platform's serial port. Writes are expected
/// to be bounded by a timeout and may accept fewer bytes than offered.
pub trait Transport {
    /// Write `bytes`, returning how many were accepted
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError>;

    /// Close and reopen the link
    fn reconnect(&mut self) -> Result<(), TransportError>;
}
