use std::sync::Arc;

use blossom::{
    config::{self, Config},
    data::{ApiClient, StaticToken},
    notification::{Alert, ChannelSink, NotificationHub},
    query::QueryCache,
};
use blossom_test_utils::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;

/// The pieces the dashboard shell wires together at start-up, pointed at a mock API.
pub struct Dashboard {
    pub config: Config,
    pub client: ApiClient,
    pub cache: QueryCache,
    pub hub: NotificationHub,
    pub alerts: UnboundedReceiver<Alert>,
}

impl Dashboard {
    /// Everything alerted so far.
    pub fn drain_alerts(&mut self) -> Vec<Alert> {
        drain_alerts(&mut self.alerts)
    }
}

/// Everything alerted so far on `alerts`; borrows only the receiver.
pub fn drain_alerts(alerts: &mut UnboundedReceiver<Alert>) -> Vec<Alert> {
    let mut drained = Vec::new();
    while let Ok(alert) = alerts.try_recv() {
        drained.push(alert);
    }
    drained
}

pub fn dashboard(test: &TestSetup, dedup_secs: u64) -> Dashboard {
    let api_url = test.api_url();
    let dedup = dedup_secs.to_string();
    let config = Config::from_lookup(|key| match key {
        config::API_URL => Some(api_url.clone()),
        config::DEDUP_WINDOW_SECS => Some(dedup.clone()),
        _ => None,
    })
    .unwrap();

    let client = ApiClient::new(
        config.api_url.clone(),
        Arc::new(StaticToken(TEST_TOKEN.to_string())),
    );
    let cache = QueryCache::new();
    let (sink, alerts) = ChannelSink::new();
    let hub = NotificationHub::new(&config, client.clone(), cache.clone(), Arc::new(sink));

    Dashboard {
        config,
        client,
        cache,
        hub,
        alerts,
    }
}
