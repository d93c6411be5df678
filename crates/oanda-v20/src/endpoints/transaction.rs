//! Transaction endpoints, including the transaction stream.

use futures_util::StreamExt;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;
use crate::stream::{EventStream, HttpEventStream};

/// Transaction history and live notifications for an account.
#[derive(Debug, Clone, Copy)]
pub struct Transaction<'a> {
    ctx: &'a Context,
}

impl<'a> Transaction<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// List transaction pages for the account, filtered by the documented
    /// query options (`from`, `to`, `pageSize`, `type`).
    pub async fn transactions(
        &self,
        account_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/transactions"), params)
            .await
    }

    /// Details of a single transaction.
    pub async fn details(
        &self,
        account_id: &str,
        transaction_id: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/transactions/{transaction_id}"),
                &[],
            )
            .await
    }

    /// Transactions in an ID range. `types` narrows the result to the
    /// given transaction filters; empty means all.
    pub async fn idrange(
        &self,
        account_id: &str,
        from: &str,
        to: &str,
        types: &[&str],
    ) -> Result<Response, Error> {
        let path = format!("/accounts/{account_id}/transactions/idrange");
        let list = types.join(",");
        let mut query = vec![("from", from), ("to", to)];
        if !types.is_empty() {
            query.push(("type", list.as_str()));
        }
        self.ctx.transport().get(&path, &query).await
    }

    /// Transactions since (not including) a transaction ID.
    pub async fn sinceid(
        &self,
        account_id: &str,
        transaction_id: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/transactions/sinceid"),
                &[("id", transaction_id)],
            )
            .await
    }

    /// Open the live transaction stream for the account.
    ///
    /// Yields one event per transaction created on the account, plus
    /// periodic heartbeats. The stream runs until closed by either side.
    pub async fn stream(&self, account_id: &str) -> Result<HttpEventStream, Error> {
        let response = self
            .ctx
            .transport()
            .open_stream(&format!("/accounts/{account_id}/transactions/stream"), &[])
            .await?;
        Ok(EventStream::new(
            response.bytes_stream().boxed(),
            self.ctx.stream_config(),
        ))
    }
}
