//! Error types for the sensor log hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to a serial device.
#[derive(Error, Debug)]
pub enum Error {
    /// Serial device path does not exist.
    #[error("Serial device not found at {0}")]
    PortNotFound(String),

    /// Serial port communication error.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Serial I/O error.
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Read or write attempted before the port was opened.
    #[error("Serial port not open")]
    NotConnected,

    /// Baud rate outside the supported set.
    #[error("Unsupported baud rate: {0}")]
    UnsupportedBaudRate(u32),
}
