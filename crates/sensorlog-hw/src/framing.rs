//! Newline framing for text record streams.

use tracing::warn;

/// Longest line kept, in bytes. Anything past it up to the next newline
/// is dropped.
pub const MAX_LINE_LEN: usize = 255;

/// Accumulates bytes from a stream and splits them into lines.
///
/// Lines end at `\n`; a trailing `\r` and surrounding whitespace are
/// stripped and blank lines are skipped. Invalid UTF-8 is replaced rather
/// than rejected.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
    overflowed: bool,
}

impl LineFramer {
    /// Creates an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk of bytes and returns every line it completed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                if let Some(line) = self.take_line() {
                    lines.push(line);
                }
                continue;
            }
            if self.pending.len() < MAX_LINE_LEN {
                self.pending.push(byte);
            } else if !self.overflowed {
                warn!("Line longer than {} bytes, truncating", MAX_LINE_LEN);
                self.overflowed = true;
            }
        }
        lines
    }

    /// Returns the unterminated remainder, if any, once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        self.take_line()
    }

    /// Returns true if a partial line is buffered.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn take_line(&mut self) -> Option<String> {
        self.overflowed = false;
        let raw = std::mem::take(&mut self.pending);
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}
