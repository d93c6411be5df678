//! Instrument endpoints.

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

/// Market history for a single instrument.
#[derive(Debug, Clone, Copy)]
pub struct Instrument<'a> {
    ctx: &'a Context,
}

impl<'a> Instrument<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Candlestick data for the instrument. `params` takes the documented
    /// query options (`granularity`, `count`, `from`, `to`, `price`, ...).
    pub async fn candles(
        &self,
        instrument: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/instruments/{instrument}/candles"), params)
            .await
    }

    /// Order book snapshot for the instrument.
    pub async fn order_book(
        &self,
        instrument: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/instruments/{instrument}/orderBook"), params)
            .await
    }

    /// Position book snapshot for the instrument.
    pub async fn position_book(
        &self,
        instrument: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/instruments/{instrument}/positionBook"), params)
            .await
    }
}
