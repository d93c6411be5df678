//! Account endpoints.

use serde::Serialize;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

/// Operations on the accounts authorized for the configured token.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    ctx: &'a Context,
}

impl<'a> Account<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// List all accounts authorized for the provided token.
    pub async fn accounts(&self) -> Result<Response, Error> {
        self.ctx.transport().get("/accounts", &[]).await
    }

    /// Full details for a single account, including pending orders, open
    /// trades and open positions.
    pub async fn details(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}"), &[])
            .await
    }

    /// Summary for a single account.
    pub async fn summary(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/summary"), &[])
            .await
    }

    /// Tradeable instruments for the account. An empty `instruments` slice
    /// queries them all.
    pub async fn instruments(
        &self,
        account_id: &str,
        instruments: &[&str],
    ) -> Result<Response, Error> {
        let path = format!("/accounts/{account_id}/instruments");
        if instruments.is_empty() {
            self.ctx.transport().get(&path, &[]).await
        } else {
            let list = instruments.join(",");
            self.ctx
                .transport()
                .get(&path, &[("instruments", list.as_str())])
                .await
        }
    }

    /// Set the client-configurable portions of the account, such as the
    /// alias or margin rate.
    pub async fn configuration<B: Serialize>(
        &self,
        account_id: &str,
        configuration: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .patch(
                &format!("/accounts/{account_id}/configuration"),
                configuration,
            )
            .await
    }

    /// Poll the account for its state and the changes since a transaction.
    pub async fn changes(
        &self,
        account_id: &str,
        since_transaction_id: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/changes"),
                &[("sinceTransactionID", since_transaction_id)],
            )
            .await
    }
}
