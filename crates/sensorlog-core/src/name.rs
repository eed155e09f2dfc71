//! Bounded sensor identifiers.

use std::fmt;

/// Longest sensor name kept, in bytes. Longer names are silently cut.
pub const MAX_NAME_LEN: usize = 49;

/// Immutable sensor identifier of at most [`MAX_NAME_LEN`] bytes.
///
/// Names are compared by exact byte equality. Truncation never splits a
/// UTF-8 sequence, so a name may end up a few bytes shorter than the limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorName(Box<str>);

impl SensorName {
    /// Creates a name, truncating it to [`MAX_NAME_LEN`] bytes.
    pub fn new(raw: &str) -> Self {
        Self(bounded(raw).into())
    }

    /// Returns true if `query`, cut to the same bound, equals this name.
    pub fn matches(&self, query: &str) -> bool {
        self.as_str() == bounded(query)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Longest prefix of `raw` that fits in [`MAX_NAME_LEN`] bytes.
fn bounded(raw: &str) -> &str {
    let mut end = raw.len().min(MAX_NAME_LEN);
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

impl From<&str> for SensorName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SensorName {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl AsRef<str> for SensorName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for SensorName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SensorName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
