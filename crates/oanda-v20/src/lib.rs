// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Oanda v20 API Client
//!
//! Client binding for the Oanda v20 REST and streaming API. A [`Context`]
//! owns one HTTP session against the practice or live environment and
//! exposes every endpoint group as an accessor; single-shot calls return a
//! decoded JSON [`Response`] tree, streaming calls return an
//! [`EventStream`] that yields one decoded event per wire message.
//!
//! # Layout
//!
//! - [`context`]: the caller-held handle owning the transport session
//! - [`endpoints`]: one group per v20 resource family (accounts, orders,
//!   trades, positions, transactions, pricing, instruments)
//! - [`response`]: generic decoded JSON tree returned by single-shot calls
//! - [`stream`]: newline-delimited JSON streaming reader (prices,
//!   transaction notifications, heartbeats)
//! - [`transport`]: reqwest-backed session (bearer auth, environment base
//!   URL selection, status checking)
//!
//! # Example
//!
//! ```no_run
//! use oanda_v20::{Context, Environment};
//!
//! # async fn run() -> Result<(), oanda_v20::Error> {
//! let ctx = Context::new("<token>", Environment::Practice)?;
//!
//! let accounts = ctx.account().accounts().await?;
//! println!("{accounts}");
//!
//! let mut prices = ctx
//!     .pricing()
//!     .stream("<account id>", &["EUR_USD"], &[])
//!     .await?;
//! while let Some(event) = prices.next_event().await? {
//!     println!("{}", event.payload());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Client configuration: credentials, environment and datetime format.
pub mod config;

/// Caller-held handle owning the transport session.
pub mod context;

/// Endpoint groups, one per v20 resource family.
pub mod endpoints;

/// Error taxonomy for configuration, transport, API and stream failures.
pub mod error;

/// Decoded JSON response tree.
pub mod response;

/// Streaming reader for newline-delimited JSON feeds.
pub mod stream;

/// HTTP transport session.
pub mod transport;

pub use config::{ClientConfig, DatetimeFormat, Environment};
pub use context::Context;
pub use endpoints::{Account, Instrument, Order, Position, Pricing, Trade, Transaction};
pub use error::Error;
pub use response::Response;
pub use stream::{
    EventStream, HttpEventStream, MalformedLinePolicy, StreamConfig, StreamEvent,
};
