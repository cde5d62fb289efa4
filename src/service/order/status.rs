//! Order status transitions.

use dioxus_logger::tracing;

use crate::{
    data::{client::ApiClient, order::OrderRepository},
    error::{ApiError, Error, ValidationErrors},
    model::order::{OrderHandler, OrderStatus, UpdateOrderStatusDto},
    query::{KeyPattern, QueryCache},
    service::order::{order_detail_key, query::ORDERS_NAMESPACE},
};

/// A validated status transition request.
///
/// Transitions into `PROCESSING`, `ON_DELIVERY` or `CANCELLED` must name the
/// handler who processed the order; the check happens here, before anything
/// is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    order_id: i64,
    status: OrderStatus,
    processed_by: Option<OrderHandler>,
}

impl StatusChange {
    /// # Returns
    /// - `Ok(StatusChange)` - The transition may be sent
    /// - `Err(ValidationErrors)` - `processedBy` is required for `status` but missing
    pub fn new(
        order_id: i64,
        status: OrderStatus,
        processed_by: Option<OrderHandler>,
    ) -> Result<Self, ValidationErrors> {
        if status.requires_handler() && processed_by.is_none() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "processedBy",
                "Please select a handler for this status change.",
            );
            return Err(errors);
        }

        Ok(Self {
            order_id,
            status,
            processed_by,
        })
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn processed_by(&self) -> Option<OrderHandler> {
        self.processed_by
    }
}

pub struct OrderStatusService<'a> {
    client: &'a ApiClient,
    cache: &'a QueryCache,
}

impl<'a> OrderStatusService<'a> {
    /// Creates a new instance of [`OrderStatusService`]
    pub fn new(client: &'a ApiClient, cache: &'a QueryCache) -> Self {
        Self { client, cache }
    }

    /// Sends a validated transition and invalidates every orders page and the
    /// order's detail entry on success.
    ///
    /// # Returns
    /// - `Ok(())` - The server accepted the transition
    /// - `Err(ApiError)` - The server rejected it or was unreachable; nothing is invalidated
    pub async fn apply(&self, change: &StatusChange) -> Result<(), ApiError> {
        let update = UpdateOrderStatusDto {
            status: change.status,
            processed_by: change.processed_by,
        };

        OrderRepository::new(self.client)
            .update_status(change.order_id, &update)
            .await?;

        tracing::info!(
            "Order #{} moved to {}{}",
            change.order_id,
            change.status,
            change
                .processed_by
                .map(|h| format!(" by {}", h))
                .unwrap_or_default()
        );

        self.cache
            .invalidate(KeyPattern::namespace(ORDERS_NAMESPACE));
        self.cache
            .invalidate(KeyPattern::Exact(order_detail_key(change.order_id)));

        Ok(())
    }

    /// Validates and sends a transition in one step.
    ///
    /// # Returns
    /// - `Ok(())` - The server accepted the transition
    /// - `Err(Error::ValidationError)` - A handler is required; no request was made
    /// - `Err(Error::ApiError)` - The request failed
    pub async fn change_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        processed_by: Option<OrderHandler>,
    ) -> Result<(), Error> {
        let change = StatusChange::new(order_id, status, processed_by)?;
        self.apply(&change).await?;
        Ok(())
    }
}
