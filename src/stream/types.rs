//! Stream types
//!
//! Line framing, line classification and reconnect settings.

use crate::types::{BackoffType, JsonValue};
use std::time::Duration;

/// One line received from the stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Blank line sent to hold the connection open
    KeepAlive,
    /// A JSON activity
    Activity(JsonValue),
    /// A line that is not JSON; the stream continues
    Malformed { line: String, error: String },
}

impl StreamEvent {
    /// Classify one line, already stripped of its terminator
    pub fn from_line(line: &str) -> Self {
        if line.trim().is_empty() {
            return StreamEvent::KeepAlive;
        }
        match serde_json::from_str(line) {
            Ok(value) => StreamEvent::Activity(value),
            Err(e) => StreamEvent::Malformed {
                line: line.to_string(),
                error: e.to_string(),
            },
        }
    }

    pub fn is_keep_alive(&self) -> bool {
        matches!(self, StreamEvent::KeepAlive)
    }
}

/// Reassembles `\n`-terminated lines from arbitrary byte chunks.
///
/// A trailing `\r` is dropped. Splitting happens on bytes, so a multi-byte
/// character cut across chunks is decoded whole.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let rest = self.pending.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.pending, rest);
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whatever was left without a terminator when the stream ended
    pub fn finish(self) -> Option<String> {
        let mut line = self.pending;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        (!line.is_empty()).then(|| String::from_utf8_lossy(&line).into_owned())
    }
}

/// Reconnect policy for the stream consumer
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Reconnects allowed before giving up; `None` means forever
    pub max_reconnects: Option<u32>,
    /// Delay before the first reconnect
    pub initial_backoff: Duration,
    /// Upper bound on any delay
    pub max_backoff: Duration,
    pub backoff_type: BackoffType,
    /// Disconnect when nothing, not even a keep-alive, arrives for this long
    pub stall_timeout: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_reconnects: None,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(320),
            backoff_type: BackoffType::Exponential,
            // Three missed 30 second keep-alives
            stall_timeout: Duration::from_secs(90),
        }
    }
}

impl ReconnectConfig {
    /// Set the reconnect limit
    #[must_use]
    pub fn max_reconnects(mut self, max: Option<u32>) -> Self {
        self.max_reconnects = max;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Set the stall timeout
    #[must_use]
    pub fn stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    /// Delay before reconnect number `attempt` (zero based), capped at
    /// `max_backoff`
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }
}

/// Totals for a finished stream run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Successful connections made
    pub connections: u32,
    /// Lines delivered to the sink, keep-alives included
    pub events: u64,
}
