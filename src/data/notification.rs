use reqwest::Method;

use crate::{
    data::client::ApiClient,
    error::ApiError,
    form::payload::Payload,
    model::{api::SubscribeRequest, notification::NEW_ORDERS_TOPIC},
};

pub struct NotificationRepository<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationRepository<'a> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Registers a push delivery token for the new-orders topic.
    pub async fn subscribe(&self, token: &str) -> Result<(), ApiError> {
        let request = SubscribeRequest {
            token: token.to_string(),
            topic: NEW_ORDERS_TOPIC.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        self.client
            .send_discarding_body(
                Method::POST,
                "notifications/subscribe",
                &[],
                Some(Payload::Json(body)),
            )
            .await
    }
}
