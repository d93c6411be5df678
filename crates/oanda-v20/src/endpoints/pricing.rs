//! Pricing endpoints, including the price stream.

use futures_util::StreamExt;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;
use crate::stream::{EventStream, HttpEventStream};

/// Pricing information for an account's tradeable instruments.
#[derive(Debug, Clone, Copy)]
pub struct Pricing<'a> {
    ctx: &'a Context,
}

impl<'a> Pricing<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Pricing snapshot for the given instruments. `params` takes the
    /// documented query options (`since`, `includeHomeConversions`, ...).
    pub async fn pricing(
        &self,
        account_id: &str,
        instruments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        let list = instruments.join(",");
        let mut query = vec![("instruments", list.as_str())];
        query.extend_from_slice(params);
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/pricing"), &query)
            .await
    }

    /// Open the live price stream for the given instruments.
    ///
    /// Yields PRICE events interleaved with periodic HEARTBEAT events, in
    /// wire order, until either side closes the connection. Dropping or
    /// closing the returned stream releases it.
    pub async fn stream(
        &self,
        account_id: &str,
        instruments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<HttpEventStream, Error> {
        let list = instruments.join(",");
        let mut query = vec![("instruments", list.as_str())];
        query.extend_from_slice(params);
        let response = self
            .ctx
            .transport()
            .open_stream(&format!("/accounts/{account_id}/pricing/stream"), &query)
            .await?;
        Ok(EventStream::new(
            response.bytes_stream().boxed(),
            self.ctx.stream_config(),
        ))
    }
}
