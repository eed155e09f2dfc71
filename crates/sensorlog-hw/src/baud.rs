//! Supported serial line speeds.

use crate::{Error, Result};
use std::str::FromStr;
use tracing::warn;

/// Serial line speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaudRate {
    /// 9600 baud, the usual board default.
    #[default]
    B9600,
    /// 19200 baud.
    B19200,
    /// 38400 baud.
    B38400,
    /// 57600 baud.
    B57600,
    /// 115200 baud.
    B115200,
}

impl BaudRate {
    /// Converts a numeric rate to BaudRate.
    pub fn from_u32(value: u32) -> Result<Self> {
        match value {
            9600 => Ok(BaudRate::B9600),
            19200 => Ok(BaudRate::B19200),
            38400 => Ok(BaudRate::B38400),
            57600 => Ok(BaudRate::B57600),
            115200 => Ok(BaudRate::B115200),
            _ => Err(Error::UnsupportedBaudRate(value)),
        }
    }

    /// Converts a numeric rate, falling back to 9600 for anything unsupported.
    pub fn from_u32_or_default(value: u32) -> Self {
        Self::from_u32(value).unwrap_or_else(|_| {
            warn!("Unsupported baud rate {}, using {}", value, BaudRate::default());
            BaudRate::default()
        })
    }

    /// Returns the numeric rate.
    pub fn as_u32(&self) -> u32 {
        match self {
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115200,
        }
    }
}

impl FromStr for BaudRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::UnsupportedBaudRate(0))?;
        Self::from_u32(value)
    }
}

impl std::fmt::Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
