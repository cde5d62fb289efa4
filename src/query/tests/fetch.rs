use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

/// Expect a fresh entry to be served without calling the fetcher again
#[tokio::test]
async fn serves_fresh_entry_from_cache() {
    let cache = QueryCache::new();
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    for _ in 0..3 {
        let result: Result<Fetched<Vec<i64>>, ()> = cache
            .fetch(&orders_key(1), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .await;
        assert_eq!(result.unwrap().into_value(), Some(vec![1, 2, 3]));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Expect different parameters to be cached independently
#[tokio::test]
async fn keys_by_parameters() {
    let cache = QueryCache::new();

    let first: Result<Fetched<u32>, ()> = cache.fetch(&orders_key(1), || async { Ok(1) }).await;
    let second: Result<Fetched<u32>, ()> = cache.fetch(&orders_key(2), || async { Ok(2) }).await;

    assert_eq!(first, Ok(Fetched::Loaded(1)));
    assert_eq!(second, Ok(Fetched::Loaded(2)));
    assert_eq!(cache.read::<u32>(&orders_key(1)).map(|e| e.value), Some(1));
}

/// Expect a failed fetch to leave the cache untouched
#[tokio::test]
async fn failed_fetch_stores_nothing() {
    let cache = QueryCache::new();

    let result: Result<Fetched<u32>, &str> = cache.fetch(&orders_key(1), || async { Err("down") }).await;

    assert_eq!(result, Err("down"));
    assert!(cache.read::<u32>(&orders_key(1)).is_none());
}

/// Expect a read with the wrong type to miss rather than panic
#[test]
fn read_with_wrong_type_misses() {
    let cache = QueryCache::new();
    cache.write(orders_key(1), 5u32);

    assert!(cache.read::<String>(&orders_key(1)).is_none());
    assert!(cache.read::<u32>(&orders_key(1)).is_some());
}
