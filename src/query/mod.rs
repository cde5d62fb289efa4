//! Query Cache.
//!
//! Holds the last response for every [`QueryKey`] so views render without a
//! round trip when nothing has changed. Mutations and notification channels
//! mark entries stale through [`QueryCache::invalidate`]; views listening on
//! [`QueryCache::subscribe`] refetch when their key is affected.
//!
//! Responses for the same key can arrive out of order. Every fetch takes a
//! [`RequestTicket`] and only the holder of the latest ticket for a key may
//! write it, so a slow response never overwrites a newer one.

pub mod key;

#[cfg(test)]
mod tests;

use std::{
    any::Any,
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use tokio::sync::broadcast::{self, error::RecvError};

pub use key::{KeyPattern, QueryKey};

const EVENT_CAPACITY: usize = 64;

/// A cached value with its freshness metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    /// Set by [`QueryCache::invalidate`]; the next fetch goes to the network.
    pub stale: bool,
    pub updated_at: DateTime<Utc>,
    /// Ticket sequence of the request that produced `value`.
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Updated(QueryKey),
    Invalidated(KeyPattern),
}

/// Waits until views of `namespace` should refetch.
///
/// A subscriber that fell behind cannot tell which events it missed, so
/// lagging counts as a refresh.
///
/// # Returns
/// - `true` - Refetch now
/// - `false` - The cache is gone
pub async fn wait_for_refresh(
    events: &mut broadcast::Receiver<CacheEvent>,
    namespace: &str,
) -> bool {
    loop {
        match events.recv().await {
            Ok(CacheEvent::Invalidated(pattern)) if pattern.touches_namespace(namespace) => {
                return true
            }
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Missed {} cache events for {}; refreshing", skipped, namespace);
                return true;
            }
            Err(RecvError::Closed) => return false,
        }
    }
}

impl CacheEvent {
    /// Whether this event concerns `key`.
    pub fn affects(&self, key: &QueryKey) -> bool {
        match self {
            Self::Updated(updated) => updated == key,
            Self::Invalidated(pattern) => pattern.matches(key),
        }
    }
}

/// Permission to write the response of one request for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub key: QueryKey,
    pub sequence: u64,
}

/// Outcome of [`QueryCache::fetch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// A fresh entry was cached; no request was made.
    Cached(T),
    /// The fetcher ran and its result was stored.
    Loaded(T),
    /// The fetcher ran but a newer request for the key was issued meanwhile;
    /// the response was dropped.
    Superseded,
}

impl<T> Fetched<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Cached(value) | Self::Loaded(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

struct Slot {
    value: Option<Arc<dyn Any + Send + Sync>>,
    stale: bool,
    updated_at: DateTime<Utc>,
    sequence: u64,
    /// Latest ticket handed out for this key.
    issued: u64,
}

impl Slot {
    fn empty() -> Self {
        Self {
            value: None,
            stale: false,
            updated_at: Utc::now(),
            sequence: 0,
            issued: 0,
        }
    }
}

#[derive(Default)]
struct CacheState {
    slots: HashMap<QueryKey, Slot>,
}

/// Keyed store of API responses shared by every view.
///
/// Cloning is cheap; clones share the same entries and event channel.
#[derive(Clone)]
pub struct QueryCache {
    state: Arc<Mutex<CacheState>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, event: CacheEvent) {
        // No receivers simply means no view is mounted.
        let _ = self.events.send(event);
    }

    /// Returns the entry for `key` if one is cached with a value of type `T`.
    pub fn read<T>(&self, key: &QueryKey) -> Option<CacheEntry<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let state = self.lock();
        let slot = state.slots.get(key)?;
        let value = slot.value.as_ref()?.downcast_ref::<T>()?.clone();

        Some(CacheEntry {
            value,
            stale: slot.stale,
            updated_at: slot.updated_at,
            sequence: slot.sequence,
        })
    }

    /// Stores `value` as the fresh entry for `key`.
    ///
    /// A direct write counts as the newest request for the key, so any
    /// response still in flight for it will be dropped.
    pub fn write<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let ticket = self.begin_request(&key);
        self.write_if_latest(&ticket, value);
    }

    /// Issues the next ticket for `key`.
    pub fn begin_request(&self, key: &QueryKey) -> RequestTicket {
        let mut state = self.lock();
        let slot = state.slots.entry(key.clone()).or_insert_with(Slot::empty);
        slot.issued += 1;

        RequestTicket {
            key: key.clone(),
            sequence: slot.issued,
        }
    }

    /// Stores `value` only if `ticket` is still the latest issued for its key.
    ///
    /// # Returns
    /// - `true` - The value was stored and subscribers notified
    /// - `false` - A newer request exists; the value was dropped
    pub fn write_if_latest<T>(&self, ticket: &RequestTicket, value: T) -> bool
    where
        T: Send + Sync + 'static,
    {
        {
            let mut state = self.lock();
            let slot = state
                .slots
                .entry(ticket.key.clone())
                .or_insert_with(Slot::empty);

            if ticket.sequence != slot.issued {
                tracing::debug!(
                    "Dropping response #{} for {}; #{} is newer",
                    ticket.sequence,
                    ticket.key,
                    slot.issued
                );
                return false;
            }

            slot.value = Some(Arc::new(value));
            slot.stale = false;
            slot.updated_at = Utc::now();
            slot.sequence = ticket.sequence;
        }

        self.notify(CacheEvent::Updated(ticket.key.clone()));
        true
    }

    /// Marks every entry matching `pattern` stale and notifies subscribers.
    ///
    /// Nothing is refetched here; views react to the event.
    pub fn invalidate(&self, pattern: KeyPattern) {
        let marked = {
            let mut state = self.lock();
            state
                .slots
                .iter_mut()
                .filter(|(key, _)| pattern.matches(key))
                .fold(0usize, |count, (_, slot)| {
                    slot.stale = true;
                    count + 1
                })
        };

        tracing::debug!("Invalidated {} cache entries for {}", marked, pattern);
        self.notify(CacheEvent::Invalidated(pattern));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Cache-then-network read.
    ///
    /// A fresh entry is returned without calling `fetcher`. Otherwise the
    /// fetcher runs under a new ticket and its result is stored if no newer
    /// request for `key` was issued in the meantime.
    ///
    /// # Arguments
    /// - `key` - Cache key of the request
    /// - `fetcher` - Performs the network request
    ///
    /// # Returns
    /// - `Ok(Fetched::Cached(T))` - Served from the cache
    /// - `Ok(Fetched::Loaded(T))` - Fetched and stored
    /// - `Ok(Fetched::Superseded)` - Fetched, but a newer request owns the key
    /// - `Err(E)` - The fetcher failed; the cache is unchanged
    pub async fn fetch<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Fetched<T>, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(entry) = self.read::<T>(key) {
            if !entry.stale {
                return Ok(Fetched::Cached(entry.value));
            }
        }

        let ticket = self.begin_request(key);
        let value = fetcher().await?;

        if self.write_if_latest(&ticket, value.clone()) {
            Ok(Fetched::Loaded(value))
        } else {
            Ok(Fetched::Superseded)
        }
    }
}
