//! Trade endpoints.

use serde::Serialize;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

/// Open and historical trades for an account.
#[derive(Debug, Clone, Copy)]
pub struct Trade<'a> {
    ctx: &'a Context,
}

impl<'a> Trade<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// List trades for the account, filtered by the documented query
    /// options (`state`, `instrument`, `count`, `ids`, `beforeID`, ...).
    pub async fn trades(
        &self,
        account_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/trades"), params)
            .await
    }

    /// List all open trades for the account.
    pub async fn open_trades(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/openTrades"), &[])
            .await
    }

    /// Details for a single trade. The specifier is either a trade ID or a
    /// client-provided `@`-prefixed tag.
    pub async fn details(
        &self,
        account_id: &str,
        trade_specifier: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/trades/{trade_specifier}"),
                &[],
            )
            .await
    }

    /// Close an open trade, fully or partially. The body carries the
    /// `units` to close (or `"ALL"`).
    pub async fn close<B: Serialize>(
        &self,
        account_id: &str,
        trade_specifier: &str,
        body: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/trades/{trade_specifier}/close"),
                Some(body),
            )
            .await
    }

    /// Update the client extensions of an open trade.
    pub async fn client_extensions<B: Serialize>(
        &self,
        account_id: &str,
        trade_specifier: &str,
        extensions: &B,
    ) -> Result<Response, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'b, B> {
            client_extensions: &'b B,
        }

        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/trades/{trade_specifier}/clientExtensions"),
                Some(&Body {
                    client_extensions: extensions,
                }),
            )
            .await
    }

    /// Create, replace or cancel the dependent orders (take profit, stop
    /// loss, trailing stop loss) of an open trade.
    pub async fn orders<B: Serialize>(
        &self,
        account_id: &str,
        trade_specifier: &str,
        body: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/trades/{trade_specifier}/orders"),
                Some(body),
            )
            .await
    }
}
