mod dedup;
mod frame;
mod hub;
mod socket;

use std::sync::Arc;

use blossom_test_utils::{fixtures, prelude::*};
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    config::{self, Config},
    data::{ApiClient, StaticToken},
    model::notification::{NotificationEvent, PushMessageDto},
    query::QueryCache,
};

use super::*;

fn test_config(api_url: &str, dedup_secs: u64) -> Config {
    let dedup = dedup_secs.to_string();
    Config::from_lookup(|key| match key {
        config::API_URL => Some(api_url.to_string()),
        config::DEDUP_WINDOW_SECS => Some(dedup.clone()),
        _ => None,
    })
    .unwrap()
}

struct TestHub {
    hub: NotificationHub,
    cache: QueryCache,
    alerts: UnboundedReceiver<Alert>,
}

impl TestHub {
    /// Everything alerted so far.
    fn drain(&mut self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        while let Ok(alert) = self.alerts.try_recv() {
            alerts.push(alert);
        }
        alerts
    }
}

fn test_hub(api_url: &str, dedup_secs: u64) -> TestHub {
    let config = test_config(api_url, dedup_secs);
    let client = ApiClient::new(
        config.api_url.clone(),
        Arc::new(StaticToken(TEST_TOKEN.to_string())),
    );
    let cache = QueryCache::new();
    let (sink, alerts) = ChannelSink::new();

    TestHub {
        hub: NotificationHub::new(&config, client, cache.clone(), Arc::new(sink)),
        cache,
        alerts,
    }
}

/// Hub with no reachable API; for tests that make no HTTP calls.
fn offline_hub(dedup_secs: u64) -> TestHub {
    test_hub("http://127.0.0.1:9/api", dedup_secs)
}

fn paid_order_json(id: i64) -> Value {
    fixtures::order::order_json(id, "PAID", Utc::now() - Duration::minutes(1), 250.0)
}

fn push_message(order_id: i64) -> PushMessageDto {
    serde_json::from_value(serde_json::json!({
        "notification": { "title": "New order", "body": format!("Order #{} was paid", order_id) },
        "data": { "orderId": order_id.to_string(), "status": "PAID" }
    }))
    .unwrap()
}

fn push_event(order_id: i64) -> NotificationEvent {
    NotificationEvent::from_push(&push_message(order_id))
}
