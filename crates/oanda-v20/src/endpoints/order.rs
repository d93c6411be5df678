//! Order endpoints.

use serde::Serialize;

use crate::context::Context;
use crate::error::Error;
use crate::response::Response;

/// The v20 write endpoints wrap order specifications in an `order` key.
#[derive(Serialize)]
struct OrderBody<'a, B> {
    order: &'a B,
}

/// Order management for an account.
#[derive(Debug, Clone, Copy)]
pub struct Order<'a> {
    ctx: &'a Context,
}

impl<'a> Order<'a> {
    pub(crate) const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Create an order from a specification (type, instrument, units, ...).
    pub async fn create<B: Serialize>(
        &self,
        account_id: &str,
        order: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .post(&format!("/accounts/{account_id}/orders"), &OrderBody { order })
            .await
    }

    /// List orders for the account, filtered by the documented query
    /// options (`state`, `instrument`, `count`, `ids`, ...).
    pub async fn orders(
        &self,
        account_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/orders"), params)
            .await
    }

    /// List all pending orders for the account.
    pub async fn pending_orders(&self, account_id: &str) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(&format!("/accounts/{account_id}/pendingOrders"), &[])
            .await
    }

    /// Details for a single order. The specifier is either an order ID or a
    /// client-provided `@`-prefixed tag.
    pub async fn details(
        &self,
        account_id: &str,
        order_specifier: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .get(
                &format!("/accounts/{account_id}/orders/{order_specifier}"),
                &[],
            )
            .await
    }

    /// Replace an order by cancelling it and creating a new one from the
    /// given specification.
    pub async fn replace<B: Serialize>(
        &self,
        account_id: &str,
        order_specifier: &str,
        order: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/orders/{order_specifier}"),
                Some(&OrderBody { order }),
            )
            .await
    }

    /// Cancel a pending order.
    pub async fn cancel(
        &self,
        account_id: &str,
        order_specifier: &str,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put::<()>(
                &format!("/accounts/{account_id}/orders/{order_specifier}/cancel"),
                None,
            )
            .await
    }

    /// Update the client extensions of an order. The body carries
    /// `clientExtensions` and/or `tradeClientExtensions` objects.
    pub async fn client_extensions<B: Serialize>(
        &self,
        account_id: &str,
        order_specifier: &str,
        extensions: &B,
    ) -> Result<Response, Error> {
        self.ctx
            .transport()
            .put(
                &format!("/accounts/{account_id}/orders/{order_specifier}/clientExtensions"),
                Some(extensions),
            )
            .await
    }
}
