//! PowerTrack stream consumer with reconnect
//!
//! CONNECTED reads lines until the body ends, errors or stalls; then
//! DISCONNECTED sleeps for the backoff delay and connects again. A 4xx on
//! connect is fatal since retrying cannot fix credentials or the URL.

use super::sink::StreamSink;
use super::types::{LineBuffer, ReconnectConfig, StreamEvent, StreamSummary};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use futures::StreamExt;
use tracing::{debug, info, warn};
use url::Url;

/// Headers every stream connection sends; `Accept-Encoding: gzip` is
/// negotiated by the client itself
pub const STREAM_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/json"),
    ("connection", "keep-alive"),
    ("gnipkeepalive", "30"),
];

/// How a single connection ended without a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disconnect {
    /// The server closed the body
    Closed,
    /// Nothing arrived within the stall timeout
    Stalled,
}

/// Long-lived consumer for one stream endpoint
#[derive(Debug, Clone)]
pub struct StreamConsumer {
    client: HttpClient,
    url: Url,
    auth: Authenticator,
    config: ReconnectConfig,
}

impl StreamConsumer {
    pub fn new(client: HttpClient, url: Url, auth: Authenticator, config: ReconnectConfig) -> Self {
        Self {
            client,
            url,
            auth,
            config,
        }
    }

    pub fn config(&self) -> &ReconnectConfig {
        &self.config
    }

    /// Consume the stream, reconnecting until the reconnect limit (if any)
    /// is used up.
    ///
    /// When the limit runs out after a failed connection, that failure is
    /// returned.
    pub async fn run<S: StreamSink>(&self, mut sink: S) -> Result<StreamSummary> {
        let mut summary = StreamSummary::default();
        let mut attempt: u32 = 0;
        let mut reconnects: u32 = 0;

        loop {
            let mut events = 0u64;
            let outcome = self.connect_once(&mut sink, &mut events).await;
            summary.events += events;
            // Data flowed, so the next failure starts from the shortest delay
            if events > 0 {
                attempt = 0;
            }

            let last_error = match outcome {
                Ok(reason) => {
                    summary.connections += 1;
                    info!(?reason, events, "Stream disconnected");
                    None
                }
                Err(e) if e.is_reconnectable() => {
                    warn!("Stream connection failed: {}", e);
                    Some(e)
                }
                Err(e) => return Err(e),
            };

            if self
                .config
                .max_reconnects
                .is_some_and(|max| reconnects >= max)
            {
                return match last_error {
                    Some(e) => Err(e),
                    None => Ok(summary),
                };
            }

            let delay = self.config.delay(attempt);
            info!("Reconnecting in {:?}", delay);
            tokio::time::sleep(delay).await;
            attempt = attempt.saturating_add(1);
            reconnects += 1;
        }
    }

    /// One CONNECTED period
    async fn connect_once<S: StreamSink>(
        &self,
        sink: &mut S,
        events: &mut u64,
    ) -> Result<Disconnect> {
        let response = self
            .client
            .open_stream(&self.url, &self.auth, STREAM_HEADERS)
            .await?;
        info!("Connected to {}", self.url);

        let mut body = response.bytes_stream();
        let mut lines = LineBuffer::new();

        loop {
            let next = tokio::time::timeout(self.config.stall_timeout, body.next()).await;
            let chunk = match next {
                Err(_) => {
                    warn!(
                        "No data for {:?}, treating stream as stalled",
                        self.config.stall_timeout
                    );
                    return Ok(Disconnect::Stalled);
                }
                Ok(None) => break,
                Ok(Some(chunk)) => chunk.map_err(Error::Transport)?,
            };

            for line in lines.push(&chunk) {
                emit(sink, &line, events)?;
            }
        }

        if let Some(line) = lines.finish() {
            debug!("Stream ended with an unterminated line");
            emit(sink, &line, events)?;
        }
        Ok(Disconnect::Closed)
    }
}

fn emit<S: StreamSink>(sink: &mut S, line: &str, events: &mut u64) -> Result<()> {
    let event = StreamEvent::from_line(line);
    sink.on_event(&event)?;
    *events += 1;
    Ok(())
}
