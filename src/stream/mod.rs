//! PowerTrack streaming module
//!
//! Reads a long-lived HTTP body line by line. Each line is a keep-alive,
//! a JSON activity, or malformed; malformed lines are reported and skipped.
//! Disconnects are followed by a capped backoff and a reconnect.

mod consumer;
mod sink;
mod types;

pub use consumer::{StreamConsumer, STREAM_HEADERS};
pub use sink::{StreamSink, WriterSink};
pub use types::{LineBuffer, ReconnectConfig, StreamEvent, StreamSummary};
