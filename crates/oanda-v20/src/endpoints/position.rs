//! Position endpoints.

use serde::Serialize;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

/// Per-instrument positions for an account.
#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    ctx: &'a Context,
}

impl<'a> Position<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// List all positions the account has ever had.
    pub async fn positions(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/positions"), &[])
            .await
    }

    /// List the open positions for the account.
    pub async fn open_positions(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/openPositions"), &[])
            .await
    }

    /// The position for a single instrument.
    pub async fn details(&self, account_id: &str, instrument: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/positions/{instrument}"),
                &[],
            )
            .await
    }

    /// Close the position for an instrument. The body carries `longUnits`
    /// and/or `shortUnits` (a number or `"ALL"`).
    pub async fn close<B: Serialize>(
        &self,
        account_id: &str,
        instrument: &str,
        body: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/positions/{instrument}/close"),
                Some(body),
            )
            .await
    }
}
