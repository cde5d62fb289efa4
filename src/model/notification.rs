use serde::{Deserialize, Serialize};

use crate::model::order::{OrderDto, OrderStatus};

/// Topic the dashboard subscribes its push token to.
pub const NEW_ORDERS_TOPIC: &str = "new_orders";

/// Which server-to-client path delivered an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Push,
    Socket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushNotificationDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDataDto {
    /// Push data values are strings on the wire; numbers are tolerated.
    #[serde(default)]
    pub order_id: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A push-messaging payload as delivered to the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushMessageDto {
    #[serde(default)]
    pub notification: Option<PushNotificationDto>,
    #[serde(default)]
    pub data: Option<PushDataDto>,
}

/// The channel-independent form every notification is normalized to before
/// it is acted on.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub order_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub title: String,
    pub body: String,
    pub source: ChannelKind,
}

impl NotificationEvent {
    /// Normalizes a push payload. Missing title/body fall back to generic text.
    pub fn from_push(message: &PushMessageDto) -> Self {
        let notification = message.notification.clone().unwrap_or_default();
        let data = message.data.clone().unwrap_or_default();

        let order_id = data.order_id.as_ref().and_then(|value| match value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        });
        // Push messages on the new_orders topic are sent once payment clears.
        let status = data
            .status
            .as_deref()
            .and_then(|s| s.parse::<OrderStatus>().ok())
            .or(Some(OrderStatus::Paid));

        Self {
            order_id,
            status,
            title: notification
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "New Notification".to_string()),
            body: notification
                .body
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| "New order received".to_string()),
            source: ChannelKind::Push,
        }
    }

    /// Normalizes an `orderUpdated` socket payload whose status is `PAID`.
    pub fn from_paid_order(order: &OrderDto) -> Self {
        Self {
            order_id: Some(order.id),
            status: Some(order.status),
            title: "New Paid Order!".to_string(),
            body: format!(
                "Order #{} has been paid. Total: AED{}",
                order.id, order.total
            ),
            source: ChannelKind::Socket,
        }
    }
}
