use crate::query::{CacheEvent, KeyPattern};

use super::*;

/// Expect a conflict to ask for force, then the forced delete to succeed
#[tokio::test]
async fn conflict_then_force() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_delete_endpoint("categories", 3, false, 409, 1)
        .with_delete_endpoint("categories", 3, true, 200, 1)
        .build()
        .await?;
    let client = test_client(&test);
    let cache = QueryCache::new();
    let mut events = cache.subscribe();
    let service = CatalogService::new(&client, &cache);

    let outcome = service.delete("categories", 3).await.unwrap();
    assert_eq!(
        outcome,
        DeleteOutcome::RequiresForce("categories 3 is still referenced".to_string())
    );
    assert!(events.try_recv().is_err());

    service.force_delete("categories", 3).await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        CacheEvent::Invalidated(KeyPattern::namespace("categories"))
    );
    test.assert_mocks();

    Ok(())
}

/// Expect a forced delete to also refresh order lists and order details
#[tokio::test]
async fn force_delete_refreshes_orders() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_delete_endpoint("products", 5, true, 200, 1)
        .build()
        .await?;
    let client = test_client(&test);
    let cache = QueryCache::new();
    cache.write(crate::service::order::order_detail_key(12), 1u8);
    let mut events = cache.subscribe();

    CatalogService::new(&client, &cache)
        .force_delete("products", 5)
        .await
        .unwrap();

    let mut invalidated = Vec::new();
    while let Ok(CacheEvent::Invalidated(pattern)) = events.try_recv() {
        invalidated.push(pattern);
    }
    assert_eq!(
        invalidated,
        vec![
            KeyPattern::namespace("products"),
            KeyPattern::namespace("orders"),
            KeyPattern::namespace("order"),
        ]
    );
    assert!(cache.read::<u8>(&crate::service::order::order_detail_key(12)).unwrap().stale);
    test.assert_mocks();

    Ok(())
}

/// Expect an unreferenced entity to be deleted on the first attempt
#[tokio::test]
async fn plain_delete() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_delete_endpoint("tags", 8, false, 200, 1)
        .build()
        .await?;
    let client = test_client(&test);
    let cache = QueryCache::new();

    let outcome = CatalogService::new(&client, &cache)
        .delete("tags", 8)
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    test.assert_mocks();

    Ok(())
}

/// Expect other failures to stay errors
#[tokio::test]
async fn missing_entity_is_an_error() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_delete_endpoint("tags", 9, false, 404, 1)
        .build()
        .await?;
    let client = test_client(&test);
    let cache = QueryCache::new();

    let result = CatalogService::new(&client, &cache).delete("tags", 9).await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
    test.assert_mocks();

    Ok(())
}
