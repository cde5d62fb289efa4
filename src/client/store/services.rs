use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    client::util::browser::IdentitySession,
    config::Config,
    data::client::ApiClient,
    notification::{Alert, ChannelSink, NotificationHub},
    query::QueryCache,
};

/// Long-lived objects shared by every page through the context.
#[derive(Clone)]
pub struct Services {
    pub config: Config,
    pub client: ApiClient,
    pub cache: QueryCache,
    pub hub: NotificationHub,
    alerts: Arc<Mutex<Option<UnboundedReceiver<Alert>>>>,
}

impl Services {
    /// Creates a new instance of [`Services`]
    pub fn new(config: Config) -> Self {
        let client = ApiClient::new(config.api_url.clone(), Arc::new(IdentitySession));
        let cache = QueryCache::new();
        let (sink, receiver) = ChannelSink::new();
        let hub = NotificationHub::new(&config, client.clone(), cache.clone(), Arc::new(sink));

        Self {
            config,
            client,
            cache,
            hub,
            alerts: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    /// Hands out the alert receiver. Only the first caller gets it.
    pub fn take_alerts(&self) -> Option<UnboundedReceiver<Alert>> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}
