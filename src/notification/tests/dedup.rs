use crate::model::order::OrderDto;

use super::*;

fn socket_event(order_id: i64) -> NotificationEvent {
    let order: OrderDto = serde_json::from_value(paid_order_json(order_id)).unwrap();
    NotificationEvent::from_paid_order(&order)
}

/// Expect a zero window to let every delivery through
#[test]
fn disabled_by_default() {
    let dedup = NotificationDeduper::new(Duration::zero());
    let now = Utc::now();

    assert!(!dedup.is_enabled());
    assert!(dedup.should_deliver(&push_event(42), now));
    assert!(dedup.should_deliver(&socket_event(42), now));
}

/// Expect the same order and status from the other channel to be suppressed inside the window
#[test]
fn suppresses_across_channels() {
    let dedup = NotificationDeduper::new(Duration::seconds(30));
    let now = Utc::now();

    assert!(dedup.should_deliver(&socket_event(42), now));
    assert!(!dedup.should_deliver(&push_event(42), now + Duration::seconds(5)));
    assert!(dedup.should_deliver(&push_event(43), now + Duration::seconds(5)));
    assert!(dedup.should_deliver(&push_event(42), now + Duration::seconds(31)));
}

/// Expect events without an order id to always alert
#[test]
fn events_without_id_pass() {
    let dedup = NotificationDeduper::new(Duration::seconds(30));
    let message: PushMessageDto =
        serde_json::from_value(serde_json::json!({ "notification": { "title": "Hi" } })).unwrap();
    let event = NotificationEvent::from_push(&message);

    assert!(dedup.should_deliver(&event, Utc::now()));
    assert!(dedup.should_deliver(&event, Utc::now()));
}
