//! Stream sinks
//!
//! Where classified stream lines go.

use super::types::StreamEvent;
use crate::error::Result;
use crate::output::to_pretty_json;
use std::io::Write;
use tracing::warn;

/// Receives every line the consumer reads
pub trait StreamSink {
    /// Handle one event. An error stops the consumer without reconnecting.
    fn on_event(&mut self, event: &StreamEvent) -> Result<()>;
}

/// Writes activities and keep-alives to a writer; malformed lines go to
/// the log
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StreamSink for WriterSink<W> {
    fn on_event(&mut self, event: &StreamEvent) -> Result<()> {
        match event {
            StreamEvent::KeepAlive => writeln!(self.out)?,
            StreamEvent::Activity(value) => {
                if self.pretty {
                    writeln!(self.out, "{}", to_pretty_json(value))?;
                } else {
                    writeln!(self.out, "{value}")?;
                }
            }
            StreamEvent::Malformed { line, error } => {
                warn!("Error processing JSON: {} {}", error, line);
                return Ok(());
            }
        }
        // Activities should reach a pipe as they arrive
        self.out.flush()?;
        Ok(())
    }
}

impl<S: StreamSink + ?Sized> StreamSink for &mut S {
    fn on_event(&mut self, event: &StreamEvent) -> Result<()> {
        (**self).on_event(event)
    }
}
