//! Endpoint groups for the v20 REST and streaming API.
//!
//! Each group is a stateless borrow of the owning
//! [`Context`](crate::Context), created through its accessors
//! (`ctx.account()`, `ctx.pricing()`, ...). Operations mirror the v20
//! endpoint catalogue: path parameters are explicit arguments, documented
//! optional query parameters are passed as `(name, value)` pairs, and
//! write bodies are anything serializable. Single-shot operations return a
//! decoded [`Response`](crate::Response); streaming operations return an
//! [`HttpEventStream`](crate::HttpEventStream).

pub use account::Account;
mod account;

pub use instrument::Instrument;
mod instrument;

pub use order::Order;
mod order;

pub use trade::Trade;
mod trade;

pub use position::Position;
mod position;

pub use transaction::Transaction;
mod transaction;

pub use pricing::Pricing;
mod pricing;
