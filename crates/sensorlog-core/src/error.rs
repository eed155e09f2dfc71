//! Error types for the sensor log core.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by lists, sensors and the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A statistic or peek was requested on a list with no readings.
    #[error("list is empty")]
    EmptyContainer,

    /// No sensor with the given name is registered.
    #[error("sensor '{0}' not found")]
    NotFound(String),

    /// An absent or malformed argument was passed in.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
