//! Caller-held handle owning the v20 transport session.

use crate::config::{ClientConfig, Environment};
use crate::endpoints::{Account, Instrument, Order, Position, Pricing, Trade, Transaction};
use crate::error::Error;
use crate::stream::StreamConfig;
use crate::transport::Transport;

/// The top-level handle for the v20 API.
///
/// Owns the single HTTP session; endpoint groups borrow the context and
/// issue requests through it. Dropping the context (or calling
/// [`close`](Self::close)) releases the session's pooled connections
/// exactly once; the borrow checker rules out use after close. Open
/// [`EventStream`](crate::EventStream)s own their response bodies
/// independently of the context that created them.
///
/// Concurrent endpoint calls through one context are safe; request
/// serialization and connection reuse are the transport's concern. The
/// context is deliberately not `Clone`: one context, one session.
#[derive(Debug)]
pub struct Context {
    transport: Transport,
    stream: StreamConfig,
}

impl Context {
    /// Create a context for `environment` authenticated by `token`.
    pub fn new(token: impl Into<String>, environment: Environment) -> Result<Self, Error> {
        Self::from_config(ClientConfig::new(token, environment))
    }

    /// Create a context from a full configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = Transport::new(&config)?;
        Ok(Self {
            transport,
            stream: config.stream,
        })
    }

    /// Account endpoints.
    #[must_use]
    pub const fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Instrument endpoints (candles, order book, position book).
    #[must_use]
    pub const fn instrument(&self) -> Instrument<'_> {
        Instrument::new(self)
    }

    /// Order endpoints.
    #[must_use]
    pub const fn order(&self) -> Order<'_> {
        Order::new(self)
    }

    /// Trade endpoints.
    #[must_use]
    pub const fn trade(&self) -> Trade<'_> {
        Trade::new(self)
    }

    /// Position endpoints.
    #[must_use]
    pub const fn position(&self) -> Position<'_> {
        Position::new(self)
    }

    /// Transaction endpoints, including the transaction stream.
    #[must_use]
    pub const fn transaction(&self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Pricing endpoints, including the price stream.
    #[must_use]
    pub const fn pricing(&self) -> Pricing<'_> {
        Pricing::new(self)
    }

    /// Release the session.
    ///
    /// Consuming: equivalent to dropping the context, spelled out for
    /// callers who want the release to be visible in the flow of control.
    pub fn close(self) {
        drop(self);
    }

    pub(crate) const fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn stream_config(&self) -> StreamConfig {
        self.stream.clone()
    }
}
