//! Cross-channel suppression of repeated notifications.
//!
//! A paid order usually arrives twice, once per channel. With a non-zero
//! window the second delivery of the same `(order id, status)` inside the
//! window is suppressed; with a zero window every delivery alerts.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Duration, Utc};

use crate::model::{notification::NotificationEvent, order::OrderStatus};

type DedupKey = (i64, Option<OrderStatus>);

#[derive(Debug, Default)]
pub struct NotificationDeduper {
    window: Duration,
    seen: Mutex<HashMap<DedupKey, DateTime<Utc>>>,
}

impl NotificationDeduper {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.window > Duration::zero()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DedupKey, DateTime<Utc>>> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records `event` and reports whether it should alert.
    ///
    /// Events without an order id cannot be matched and always alert.
    pub fn should_deliver(&self, event: &NotificationEvent, now: DateTime<Utc>) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let Some(order_id) = event.order_id else {
            return true;
        };

        let mut seen = self.lock();
        seen.retain(|_, at| now - *at < self.window);

        let key = (order_id, event.status);
        if seen.contains_key(&key) {
            return false;
        }
        seen.insert(key, now);
        true
    }
}
