mod export;
mod query;
mod view;

use std::sync::Arc;

use blossom_test_utils::{fixtures, prelude::*};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use crate::{
    data::{ApiClient, StaticToken},
    model::order::{OrderDto, OrderStatus},
};

use super::*;

/// Gulf Standard Time.
fn gst() -> FixedOffset {
    FixedOffset::east_opt(4 * 3600).unwrap()
}

fn test_client(test: &TestSetup) -> ApiClient {
    ApiClient::new(test.api_url(), Arc::new(StaticToken(TEST_TOKEN.to_string())))
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

fn make_order(id: i64, status: OrderStatus, created_at: DateTime<Utc>, total: f64) -> OrderDto {
    serde_json::from_value(fixtures::order::order_json(id, status.as_str(), created_at, total)).unwrap()
}

fn with_coupon(mut order: OrderDto, code: &str) -> OrderDto {
    order.coupon = Some(crate::model::order::OrderCouponDto {
        discount: 10.0,
        code: Some(code.to_string()),
    });
    order
}

fn settings(client_refilter: bool) -> ViewSettings {
    ViewSettings {
        page_size: 10,
        client_refilter,
        utc_offset: gst(),
        new_order_window: Duration::minutes(20),
    }
}
