use blossom_test_utils::fixtures;

use crate::{
    error::ApiError,
    model::order::OrdersPageDto,
    query::{CacheEvent, KeyPattern},
    service::order::view::OrdersPage,
};

use super::*;

fn page_of(orders: Vec<OrderDto>, total_pages: u32) -> OrdersPageDto {
    OrdersPageDto {
        total_count: orders.len() as u64,
        items: orders,
        total_pages,
        current_page: 1,
    }
}

fn loaded(request: &LoadRequest, page: OrdersPageDto) -> LoadResult {
    LoadResult {
        generation: request.generation,
        result: Ok(Fetched::Loaded(page)),
    }
}

/// Expect Idle, then Loading on mount, then Ready once the page arrives
#[test]
fn loads_on_mount() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    assert_eq!(view.state(), &ViewState::Idle);

    let request = view.mount();
    assert_eq!(view.state(), &ViewState::Loading);

    let applied = view.apply(
        loaded(&request, page_of(vec![make_order(1, OrderStatus::Paid, now, 5.0)], 3)),
        now,
    );

    assert!(applied);
    assert!(matches!(view.state(), ViewState::Ready(OrdersPage { total_pages: 3, .. })));
    assert!(view.can_go_forward());
    assert!(!view.can_go_back());
}

/// Expect rendered rows never to exceed the page size
#[test]
fn truncates_to_page_size() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = view.mount();
    let orders = (0..15)
        .map(|i| make_order(100 - i, OrderStatus::Paid, now - Duration::minutes(i), 1.0))
        .collect();

    view.apply(loaded(&request, page_of(orders, 2)), now);

    assert_eq!(view.rows(now).len(), 10);
}

/// Expect row numbers to continue across pages and recent orders to be flagged new
#[test]
fn numbers_rows_across_pages() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let first = view.mount();
    view.apply(loaded(&first, page_of(vec![], 3)), now);

    let second = view.set_page(2).unwrap();
    view.apply(
        loaded(
            &second,
            page_of(
                vec![
                    make_order(9, OrderStatus::Paid, now - Duration::minutes(5), 1.0),
                    make_order(8, OrderStatus::Paid, now - Duration::minutes(45), 1.0),
                ],
                3,
            ),
        ),
        now,
    );

    let rows = view.rows(now);
    assert_eq!(rows[0].number, 11);
    assert_eq!(rows[1].number, 12);
    assert!(rows[0].is_new);
    assert!(!rows[1].is_new);
}

/// Expect a response for an older generation to be dropped
#[test]
fn drops_outdated_response() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let stale = view.mount();
    let fresh = view.toggle_sort(SortField::Total).unwrap();

    let fresh_applied = view.apply(
        loaded(&fresh, page_of(vec![make_order(2, OrderStatus::Paid, now, 99.0)], 1)),
        now,
    );
    let stale_applied = view.apply(
        loaded(&stale, page_of(vec![make_order(1, OrderStatus::Paid, now, 1.0)], 1)),
        now,
    );

    assert!(fresh_applied);
    assert!(!stale_applied);
    assert_eq!(view.rows(now)[0].order.id, 2);
}

/// Expect nothing to be applied after unmount
#[test]
fn drops_response_after_unmount() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = view.mount();
    view.unmount();

    assert!(!view.apply(loaded(&request, page_of(vec![], 1)), now));
    assert_eq!(view.state(), &ViewState::Loading);
}

/// Expect the sort toggle to flip on the same field and reset to descending on a new one
#[test]
fn toggles_sort() {
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    view.mount();

    view.toggle_sort(SortField::CreatedAt).unwrap();
    assert_eq!(view.query().sort_direction, SortDirection::Asc);

    view.toggle_sort(SortField::CreatedAt).unwrap();
    assert_eq!(view.query().sort_direction, SortDirection::Desc);

    view.toggle_sort(SortField::Total).unwrap();
    view.toggle_sort(SortField::Total).unwrap();
    view.toggle_sort(SortField::Coupon).unwrap();
    assert_eq!(view.query().sort_field, SortField::Coupon);
    assert_eq!(view.query().sort_direction, SortDirection::Desc);
}

/// Expect filter changes to go back to Loading on the first page, and no-op changes to do nothing
#[test]
fn filter_change_reloads_from_first_page() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = view.mount();
    view.apply(loaded(&request, page_of(vec![], 5)), now);
    view.set_page(3).unwrap();

    let request = view
        .set_status_filter(StatusFilter::Only(OrderStatus::Paid))
        .unwrap();

    assert_eq!(request.query.page, 1);
    assert_eq!(view.state(), &ViewState::Loading);
    assert!(view
        .set_status_filter(StatusFilter::Only(OrderStatus::Paid))
        .is_none());
}

/// Expect the daily screen to refuse coupon filters and long date ranges
#[test]
fn daily_variant_limits_filters() {
    let mut view = OrderListView::new(ListVariant::DailyOrders, settings(false));
    view.mount();

    assert!(view.set_coupon_filter(CouponFilter::Code("SPRING".into())).is_none());
    assert!(view.set_date_filter(DateFilter::Month).is_none());
    assert!(view.set_date_filter(DateFilter::Week).is_some());
    assert!(!view.variant().shows_coupons());
}

/// Expect an error panel, then a successful retry
#[test]
fn error_then_retry() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = view.mount();

    view.apply(
        LoadResult {
            generation: request.generation,
            result: Err(ApiError::NetworkUnavailable("offline".into())),
        },
        now,
    );
    assert!(matches!(view.state(), ViewState::Error(ApiError::NetworkUnavailable(_))));

    let retry = view.retry();
    view.apply(loaded(&retry, page_of(vec![], 1)), now);
    assert!(matches!(view.state(), ViewState::Ready(_)));
}

/// Expect an invalidation of the orders namespace to move Ready back to Loading
#[test]
fn invalidation_reloads() {
    let now = Utc::now();
    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = view.mount();
    view.apply(loaded(&request, page_of(vec![], 1)), now);

    let unrelated = view.on_cache_event(&CacheEvent::Invalidated(KeyPattern::namespace("products")));
    assert!(unrelated.is_none());

    let reload = view.on_cache_event(&CacheEvent::Invalidated(KeyPattern::namespace("orders")));
    assert!(reload.is_some());
    assert_eq!(view.state(), &ViewState::Loading);

    let key = view.query().cache_key();
    let update = view.on_cache_event(&CacheEvent::Updated(key));
    assert!(update.is_none());
}

/// Expect client re-filtering to be off by default and to drop rows when enabled
#[test]
fn refilter_is_opt_in() {
    let now = Utc::now();
    let page = || {
        page_of(
            vec![
                make_order(2, OrderStatus::Paid, now, 1.0),
                make_order(1, OrderStatus::Paid, now - Duration::days(30), 1.0),
            ],
            1,
        )
    };

    let mut server_only = OrderListView::new(ListVariant::AllOrders, settings(false));
    let request = server_only.mount();
    server_only.apply(loaded(&request, page()), now);
    assert_eq!(server_only.rows(now).len(), 2);

    let mut refiltered = OrderListView::new(ListVariant::AllOrders, settings(true));
    let request = refiltered.mount();
    refiltered.apply(loaded(&request, page()), now);
    assert_eq!(refiltered.rows(now).len(), 1);
}

/// Expect repeated loads with unchanged parameters to hit the network once
#[tokio::test]
async fn repeated_loads_are_cached() -> Result<(), TestError> {
    let now = Utc::now();
    let test = TestBuilder::new()
        .with_orders_endpoint(
            fixtures::order::orders_page_json(vec![fixtures::order::order_json(1, "PAID", now, 10.0)], 1, 1),
            1,
        )
        .build()
        .await?;
    let client = test_client(&test);
    let cache = QueryCache::new();
    let service = OrderService::new(&client, &cache, gst());

    let mut view = OrderListView::new(ListVariant::AllOrders, settings(false));
    let result = view.mount().execute(&service).await;
    assert!(matches!(result.result, Ok(Fetched::Loaded(_))));
    view.apply(result, now);

    let result = view.retry().execute(&service).await;
    assert!(matches!(result.result, Ok(Fetched::Cached(_))));
    view.apply(result, now);

    assert_eq!(view.rows(now).len(), 1);
    test.assert_mocks();

    Ok(())
}
