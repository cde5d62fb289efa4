use super::*;

/// Expect a slow response to be dropped once a newer request was issued
#[test]
fn drops_out_of_order_response() {
    let cache = QueryCache::new();
    let key = orders_key(1);

    let slow = cache.begin_request(&key);
    let fast = cache.begin_request(&key);

    assert!(cache.write_if_latest(&fast, "new"));
    assert!(!cache.write_if_latest(&slow, "old"));

    let entry = cache.read::<&str>(&key).unwrap();
    assert_eq!(entry.value, "new");
    assert_eq!(entry.sequence, fast.sequence);
}

/// Expect fetch to report Superseded when a direct write lands first
#[tokio::test]
async fn fetch_reports_superseded() {
    let cache = QueryCache::new();
    let key = orders_key(1);

    let outcome: Result<Fetched<u32>, ()> = cache
        .fetch(&key, || {
            // A newer write for the same key lands while this request is in flight.
            cache.write(key.clone(), 2u32);
            async { Ok(1u32) }
        })
        .await;

    assert_eq!(outcome, Ok(Fetched::Superseded));
    assert_eq!(cache.read::<u32>(&key).map(|e| e.value), Some(2));
}

/// Expect tickets to be issued per key
#[test]
fn tickets_are_per_key() {
    let cache = QueryCache::new();

    let a = cache.begin_request(&orders_key(1));
    let b = cache.begin_request(&orders_key(2));

    assert!(cache.write_if_latest(&a, 1u32));
    assert!(cache.write_if_latest(&b, 2u32));
}
