//! Sensor Log Hardware Library
//!
//! Serial transport for microcontroller boards (Arduino, ESP32 and the
//! like) that stream `ID:value` text records, plus the line framing that
//! turns raw bytes into records.

pub mod baud;
pub mod error;
pub mod framing;
pub mod serial;

pub use baud::BaudRate;
pub use error::{Error, Result};
pub use framing::{LineFramer, MAX_LINE_LEN};
pub use serial::SerialLink;
