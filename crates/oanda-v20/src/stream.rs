//! Streaming reader for newline-delimited JSON feeds.
//!
//! The v20 streaming endpoints (pricing, transactions) deliver one JSON
//! document per line over a chunked HTTP response body, with blank lines as
//! keep-alive padding and a `type` discriminator inside each document.
//! [`EventStream`] assembles complete lines out of arbitrarily sized
//! chunks, decodes each into a [`StreamEvent`], and yields them in wire
//! order until the server closes the connection, the transport fails, or
//! the caller closes the handle.

use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use bytes::Bytes;
use futures_util::Stream;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::error::Error;
use crate::response::Response;

/// The discriminator tag of keep-alive heartbeat messages.
const HEARTBEAT_TYPE: &str = "HEARTBEAT";

/// Policy for a stream line that fails to decode as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Skip the line and keep the stream alive. The anomaly is reported
    /// through `tracing` and [`EventStream::malformed_count`].
    #[default]
    Skip,
    /// Terminate the stream with a protocol error.
    Abort,
}

/// Settings for the streaming reader.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Maximum bytes buffered while waiting for a line delimiter. A line
    /// that grows past this without a delimiter fails the stream.
    pub max_message_len: usize,
    /// What to do with a line that is not valid JSON.
    pub on_malformed: MalformedLinePolicy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_message_len: 1024 * 1024,
            on_malformed: MalformedLinePolicy::Skip,
        }
    }
}

impl StreamConfig {
    /// Set the delimiter-free buffer cap.
    #[must_use]
    pub const fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len;
        self
    }

    /// Set the malformed-line policy.
    #[must_use]
    pub const fn with_malformed_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed = policy;
        self
    }
}

/// One decoded message from a streaming feed.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    payload: Response,
}

impl StreamEvent {
    /// The `type` discriminator carried in the payload, if present
    /// (`"PRICE"`, `"HEARTBEAT"`, `"ORDER_FILL"`, ...).
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.payload.get("type").and_then(|v| v.as_str())
    }

    /// Whether this is a keep-alive heartbeat.
    #[must_use]
    pub fn is_heartbeat(&self) -> bool {
        self.event_type() == Some(HEARTBEAT_TYPE)
    }

    /// The decoded message body.
    #[must_use]
    pub const fn payload(&self) -> &Response {
        &self.payload
    }

    /// Consume the event, returning the decoded body.
    #[must_use]
    pub fn into_payload(self) -> Response {
        self.payload
    }
}

/// Event stream over a live chunked HTTP response body.
pub type HttpEventStream = EventStream<BoxStream<'static, Result<Bytes, reqwest::Error>>>;

/// Lazy sequence of [`StreamEvent`]s read from a chunked response body.
///
/// The handle owns the body for its lifetime and releases the connection
/// when the stream is exhausted, fails, is [`close`](Self::close)d, or is
/// dropped. Events are delivered strictly in wire order; nothing is
/// buffered beyond the bytes of the message currently being assembled.
///
/// Generic over the chunk source so the reader can be driven from an
/// in-memory sequence in tests; [`HttpEventStream`] is the alias endpoint
/// bindings return.
pub struct EventStream<S> {
    source: Option<S>,
    buf: Vec<u8>,
    config: StreamConfig,
    skip_heartbeats: bool,
    malformed: u64,
}

impl<S> std::fmt::Debug for EventStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("open", &self.source.is_some())
            .field("buffered", &self.buf.len())
            .field("config", &self.config)
            .field("skip_heartbeats", &self.skip_heartbeats)
            .field("malformed", &self.malformed)
            .finish()
    }
}

impl<S, E> EventStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    /// Wrap a chunked byte source.
    #[must_use]
    pub fn new(source: S, config: StreamConfig) -> Self {
        Self {
            source: Some(source),
            buf: Vec::new(),
            config,
            skip_heartbeats: false,
            malformed: 0,
        }
    }

    /// Drop keep-alive heartbeats instead of yielding them.
    #[must_use]
    pub fn skip_heartbeats(mut self, skip: bool) -> Self {
        self.skip_heartbeats = skip;
        self
    }

    /// Lines skipped so far under [`MalformedLinePolicy::Skip`].
    #[must_use]
    pub const fn malformed_count(&self) -> u64 {
        self.malformed
    }

    /// Whether the underlying connection has been released.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Pull the next event.
    ///
    /// Waits until a complete line-delimited message has been assembled and
    /// decoded (`Ok(Some(event))`), the server closes the stream
    /// (`Ok(None)`), or the transport or wire format fails (`Err`). A
    /// terminal error closes the stream and is surfaced exactly once; every
    /// later pull returns `Ok(None)`.
    pub async fn next_event(&mut self) -> Result<Option<StreamEvent>, Error> {
        self.next().await.transpose()
    }

    /// Release the underlying connection.
    ///
    /// Idempotent: the first call drops the response body (tearing down
    /// the connection) and discards any partially buffered bytes; later
    /// calls are no-ops. After closing, pulls return `Ok(None)`.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            self.buf.clear();
            tracing::debug!("Stream closed");
        }
    }

    /// Next complete line in the buffer, delimiter stripped.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Decode one assembled line. Returns `None` for lines that produce no
    /// event (keep-alive padding, filtered heartbeats, skipped garbage).
    fn decode_line(&mut self, line: &[u8]) -> Option<Result<StreamEvent, Error>> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match Response::from_slice(line) {
            Ok(payload) => {
                let event = StreamEvent { payload };
                if self.skip_heartbeats && event.is_heartbeat() {
                    None
                } else {
                    Some(Ok(event))
                }
            }
            Err(err) => match self.config.on_malformed {
                MalformedLinePolicy::Skip => {
                    self.malformed += 1;
                    tracing::warn!(
                        error = %err,
                        skipped = self.malformed,
                        "Skipping malformed stream message"
                    );
                    None
                }
                MalformedLinePolicy::Abort => {
                    self.close();
                    Some(Err(Error::Protocol {
                        message: format!("malformed stream message: {err}"),
                    }))
                }
            },
        }
    }
}

impl<S, E> Stream for EventStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    type Item = Result<StreamEvent, Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            // Drain complete lines already buffered before polling for more
            // bytes, so one chunk carrying several messages yields them all.
            while let Some(line) = this.take_line() {
                if let Some(item) = this.decode_line(&line) {
                    return Poll::Ready(Some(item));
                }
            }

            // The remainder is delimiter-free; enforce the buffer cap.
            if this.buf.len() > this.config.max_message_len {
                this.close();
                return Poll::Ready(Some(Err(Error::Protocol {
                    message: format!(
                        "stream message exceeded {} bytes without a delimiter",
                        this.config.max_message_len
                    ),
                })));
            }

            let Some(source) = this.source.as_mut() else {
                return Poll::Ready(None);
            };
            match Pin::new(source).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => this.buf.extend_from_slice(&chunk),
                Poll::Ready(Some(Err(err))) => {
                    this.close();
                    return Poll::Ready(Some(Err(err.into())));
                }
                Poll::Ready(None) => {
                    // Normal server-side end. A trailing unterminated
                    // fragment is one final message.
                    let rest = std::mem::take(&mut this.buf);
                    this.close();
                    if let Some(item) = this.decode_line(&rest) {
                        return Poll::Ready(Some(item));
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::stream;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    use super::*;

    const FIXTURE: &[u8] = b"{\"type\":\"HEARTBEAT\",\"time\":\"1\"}\n{\"type\":\"PRICE\",\"instrument\":\"EUR_USD\",\"bids\":[{\"price\":\"1.1000\"}]}\n";

    fn reader(chunks: Vec<Vec<u8>>, config: StreamConfig) -> EventStream<impl Stream<Item = Result<Bytes, Error>> + Unpin> {
        let source = stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))));
        EventStream::new(source, config)
    }

    async fn collect_payloads(chunks: Vec<Vec<u8>>) -> Vec<Value> {
        let mut events = reader(chunks, StreamConfig::default());
        let mut payloads = Vec::new();
        while let Some(event) = events.next_event().await.unwrap() {
            payloads.push(event.into_payload().into_inner());
        }
        payloads
    }

    #[tokio::test]
    async fn yields_events_from_single_chunk() {
        let mut events = reader(vec![FIXTURE.to_vec()], StreamConfig::default());

        let first = events.next_event().await.unwrap().unwrap();
        assert!(first.is_heartbeat());
        assert_eq!(first.payload().get("time").and_then(Value::as_str), Some("1"));

        let second = events.next_event().await.unwrap().unwrap();
        assert_eq!(second.event_type(), Some("PRICE"));
        assert_eq!(
            second.payload()["instrument"].as_str(),
            Some("EUR_USD")
        );
        assert_eq!(
            second.payload()["bids"][0]["price"].as_str(),
            Some("1.1000")
        );

        assert!(events.next_event().await.unwrap().is_none());
        assert!(events.is_closed());
    }

    #[tokio::test]
    async fn yields_events_split_mid_line() {
        let (a, b) = FIXTURE.split_at(17);
        let payloads = collect_payloads(vec![a.to_vec(), b.to_vec()]).await;
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1]["instrument"], json!("EUR_USD"));
    }

    #[tokio::test]
    async fn yields_events_one_byte_at_a_time() {
        let chunks = FIXTURE.iter().map(|&b| vec![b]).collect();
        let single = collect_payloads(vec![FIXTURE.to_vec()]).await;
        assert_eq!(collect_payloads(chunks).await, single);
    }

    #[tokio::test]
    async fn handles_crlf_delimiters() {
        let input = b"{\"type\":\"HEARTBEAT\",\"time\":\"2\"}\r\n".to_vec();
        let payloads = collect_payloads(vec![input]).await;
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["time"], json!("2"));
    }

    #[tokio::test]
    async fn skips_blank_keepalive_lines() {
        let input = b"\n  \n{\"type\":\"HEARTBEAT\",\"time\":\"3\"}\n\n".to_vec();
        let payloads = collect_payloads(vec![input]).await;
        assert_eq!(payloads.len(), 1);
    }

    #[tokio::test]
    async fn decodes_trailing_unterminated_fragment() {
        let input = b"{\"type\":\"HEARTBEAT\",\"time\":\"4\"}".to_vec();
        let payloads = collect_payloads(vec![input]).await;
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["time"], json!("4"));
    }

    #[tokio::test]
    async fn skip_policy_reports_and_continues() {
        let input = b"{\"type\":\"PRICE\",\"n\":1}\nnot json\n{\"type\":\"PRICE\",\"n\":2}\n".to_vec();
        let mut events = reader(vec![input], StreamConfig::default());

        let first = events.next_event().await.unwrap().unwrap();
        assert_eq!(first.payload()["n"], json!(1));
        let second = events.next_event().await.unwrap().unwrap();
        assert_eq!(second.payload()["n"], json!(2));
        assert!(events.next_event().await.unwrap().is_none());
        assert_eq!(events.malformed_count(), 1);
    }

    #[tokio::test]
    async fn abort_policy_fails_the_stream() {
        let input = b"{\"type\":\"PRICE\",\"n\":1}\nnot json\n{\"type\":\"PRICE\",\"n\":2}\n".to_vec();
        let config = StreamConfig::default().with_malformed_policy(MalformedLinePolicy::Abort);
        let mut events = reader(vec![input], config);

        assert!(events.next_event().await.unwrap().is_some());
        let err = events.next_event().await.unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));

        // The error is terminal and surfaced once.
        assert!(events.is_closed());
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_line_is_a_protocol_error() {
        let config = StreamConfig::default().with_max_message_len(16);
        let mut events = reader(vec![vec![b'x'; 64]], config);

        let err = events.next_event().await.unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_check_ignores_already_delimited_lines() {
        // Two small messages arriving in one chunk larger than the cap must
        // still decode; only a delimiter-free remainder is capped.
        let config = StreamConfig::default().with_max_message_len(40);
        let mut events = reader(vec![FIXTURE.to_vec()], config);

        assert!(events.next_event().await.unwrap().is_some());
        assert!(events.next_event().await.unwrap().is_some());
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transport_error_is_surfaced_once() {
        let source = stream::iter(vec![
            Ok(Bytes::from_static(b"{\"type\":\"HEARTBEAT\",\"time\":\"5\"}\n")),
            Err(Error::Transport {
                message: "connection reset".to_string(),
            }),
        ]);
        let mut events = EventStream::new(source, StreamConfig::default());

        assert!(events.next_event().await.unwrap().is_some());
        let err = events.next_event().await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut events = reader(vec![FIXTURE.to_vec()], StreamConfig::default());
        assert!(events.next_event().await.unwrap().is_some());

        events.close();
        assert!(events.is_closed());
        events.close();

        // Buffered bytes were discarded with the connection.
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn skip_heartbeats_filters_events() {
        let mut events =
            reader(vec![FIXTURE.to_vec()], StreamConfig::default()).skip_heartbeats(true);

        let first = events.next_event().await.unwrap().unwrap();
        assert_eq!(first.event_type(), Some("PRICE"));
        assert!(events.next_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn third_pull_waits_for_more_data() {
        let fixture = stream::iter(vec![Ok::<_, Error>(Bytes::from_static(FIXTURE))]);
        let open_ended = fixture.chain(stream::pending());
        let mut events = EventStream::new(open_ended, StreamConfig::default());

        assert!(events.next_event().await.unwrap().is_some());
        assert!(events.next_event().await.unwrap().is_some());

        let third = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            events.next_event(),
        )
        .await;
        assert!(third.is_err(), "third pull must block while the stream is open");
    }

    proptest! {
        #[test]
        fn chunk_boundaries_do_not_change_events(
            cuts in prop::collection::btree_set(1..FIXTURE.len(), 0..8)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            runtime.block_on(async {
                let mut chunks = Vec::new();
                let mut start = 0;
                for cut in cuts {
                    chunks.push(FIXTURE[start..cut].to_vec());
                    start = cut;
                }
                chunks.push(FIXTURE[start..].to_vec());

                let split = collect_payloads(chunks).await;
                let whole = collect_payloads(vec![FIXTURE.to_vec()]).await;
                prop_assert_eq!(split, whole);
                Ok(())
            })?;
        }
    }
}
