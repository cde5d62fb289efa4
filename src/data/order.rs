use reqwest::Method;

use crate::{
    data::client::ApiClient,
    error::ApiError,
    form::payload::Payload,
    model::order::{OrderDto, OrdersPageDto, UpdateOrderStatusDto},
};

pub struct OrderRepository<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderRepository<'a> {
    /// Creates a new instance of [`OrderRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetches one page of orders; `params` carries paging, sorting and filters.
    pub async fn list(&self, params: &[(&'static str, String)]) -> Result<OrdersPageDto, ApiError> {
        self.client.get("orders/all", params).await
    }

    pub async fn get_by_id(&self, order_id: i64) -> Result<OrderDto, ApiError> {
        self.client
            .get(&format!("orders/getById/{}", order_id), &[])
            .await
    }

    /// Requests a status transition. The server decides whether it is allowed.
    pub async fn update_status(
        &self,
        order_id: i64,
        update: &UpdateOrderStatusDto,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        self.client
            .send_discarding_body(
                Method::PATCH,
                &format!("orders/{}/status", order_id),
                &[],
                Some(Payload::Json(body)),
            )
            .await
    }
}
