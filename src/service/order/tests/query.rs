use chrono::NaiveDate;

use super::*;

fn params_map(query: &OrderQuery) -> std::collections::HashMap<&'static str, String> {
    query.to_params(gst()).into_iter().collect()
}

/// Expect the default query to ask for today's newest orders
#[test]
fn default_query() {
    let query = OrderQuery::new(10);
    let params = params_map(&query);

    assert_eq!(params["page"], "1");
    assert_eq!(params["pageSize"], "10");
    assert_eq!(params["sortField"], "createdAt");
    assert_eq!(params["sortDirection"], "desc");
    assert_eq!(params["filterStatus"], "ALL");
    assert_eq!(params["selectedCoupon"], "ALL");
    assert_eq!(params["dateFilter"], "today");
    assert!(!params.contains_key("customStartDate"));
}

/// Expect custom ranges to send both bounds, the end being the midnight after the last day
#[test]
fn custom_range_params() {
    let mut query = OrderQuery::new(10);
    query.date = DateFilter::custom(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    );
    let params = params_map(&query);

    assert_eq!(params["dateFilter"], "custom");
    assert_eq!(params["customStartDate"], "2025-02-28T20:00:00+00:00");
    assert_eq!(params["customEndDate"], "2025-03-05T20:00:00+00:00");
}

/// Expect reversed custom bounds to be swapped
#[test]
fn custom_range_swaps_bounds() {
    let early = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let late = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();

    assert_eq!(DateFilter::custom(late, early), DateFilter::custom(early, late));
}

/// Expect distinct parameters to produce distinct cache keys in the orders namespace
#[test]
fn cache_key_covers_parameters() {
    let first = OrderQuery::new(10);
    let mut second = first.clone();
    second.page = 2;

    assert_ne!(first.cache_key(), second.cache_key());
    assert_eq!(first.cache_key().namespace, "orders");
    assert_eq!(first.cache_key(), OrderQuery::new(10).cache_key());
}

/// Expect day boundaries to follow the shop's time zone
#[test]
fn today_uses_local_midnight() {
    // 22:30 UTC on the 9th is 02:30 on the 10th in Dubai.
    let now = at(2025, 6, 9, 22, 30);
    let range = DateFilter::Today.range(now, gst()).unwrap();

    assert_eq!(range.start, at(2025, 6, 9, 20, 0));
    assert_eq!(range.end, at(2025, 6, 10, 20, 0));
    assert!(range.contains(now));
}

/// Expect yesterday to cover exactly the previous local day
#[test]
fn yesterday_is_previous_day() {
    let now = at(2025, 6, 10, 8, 0);
    let range = DateFilter::Yesterday.range(now, gst()).unwrap();

    assert_eq!(range.start, at(2025, 6, 8, 20, 0));
    assert_eq!(range.end, at(2025, 6, 9, 20, 0));
    assert!(!range.contains(now));
    assert!(range.contains(at(2025, 6, 9, 12, 0)));
}

/// Expect month presets to wrap around the year
#[test]
fn month_presets_wrap_year() {
    let now = at(2025, 1, 15, 8, 0);

    let this_month = DateFilter::Month.range(now, gst()).unwrap();
    assert_eq!(this_month.start, at(2024, 12, 31, 20, 0));
    assert_eq!(this_month.end, at(2025, 1, 31, 20, 0));

    let last_month = DateFilter::LastMonth.range(now, gst()).unwrap();
    assert_eq!(last_month.start, at(2024, 11, 30, 20, 0));
    assert_eq!(last_month.end, at(2024, 12, 31, 20, 0));
}

/// Expect the week preset to reach back seven days from now
#[test]
fn week_is_rolling() {
    let now = at(2025, 6, 10, 8, 0);
    let range = DateFilter::Week.range(now, gst()).unwrap();

    assert_eq!(range.start, now - Duration::days(7));
    assert!(range.contains(now));
    assert!(!range.contains(now - Duration::days(8)));
}

/// Expect no range for the all-time filter
#[test]
fn all_has_no_range() {
    assert_eq!(DateFilter::All.range(Utc::now(), gst()), None);
}

/// Expect filter names to parse back
#[test]
fn parses_filters() {
    assert_eq!(StatusFilter::parse("ALL"), Some(StatusFilter::All));
    assert_eq!(
        StatusFilter::parse("ON_DELIVERY"),
        Some(StatusFilter::Only(OrderStatus::OnDelivery))
    );
    assert_eq!(StatusFilter::parse("SHIPPED"), None);
    assert_eq!(CouponFilter::parse("ALL"), CouponFilter::All);
    assert_eq!(CouponFilter::parse("SPRING"), CouponFilter::Code("SPRING".into()));
    assert_eq!(DateFilter::parse_preset("lastMonth"), Some(DateFilter::LastMonth));
    assert_eq!(DateFilter::parse_preset("custom"), None);
}
