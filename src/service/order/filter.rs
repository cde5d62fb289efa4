//! Local checks applied to a page of orders after it arrives.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    model::order::OrderDto,
    service::order::query::{OrderQuery, SortDirection, SortField},
};

/// Removes orders whose status or creation date falls outside the query's
/// filters. Relative order of the remaining rows is preserved.
pub fn refilter(
    mut orders: Vec<OrderDto>,
    query: &OrderQuery,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<OrderDto> {
    let range = query.date.range(now, offset);

    orders.retain(|order| {
        query.status.accepts(order.status)
            && range.map_or(true, |r| r.contains(order.created_at))
    });

    orders
}

/// Ascending comparison on the sort field alone.
fn compare_field(a: &OrderDto, b: &OrderDto, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Total => a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal),
        // Orders without a coupon come first, then by code.
        SortField::Coupon => match (a.coupon_code(), b.coupon_code()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(y),
        },
    }
}

/// Total order used for the tables: the sort field, then the order id.
pub fn compare_orders(
    a: &OrderDto,
    b: &OrderDto,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = compare_field(a, b, field).then_with(|| a.id.cmp(&b.id));

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Whether `orders` respects the requested sort field and direction.
///
/// Ties on the sort field are accepted in any order.
pub fn is_sorted(orders: &[OrderDto], field: SortField, direction: SortDirection) -> bool {
    orders.windows(2).all(|pair| {
        let ordering = compare_field(&pair[0], &pair[1], field);
        match direction {
            SortDirection::Asc => ordering != Ordering::Greater,
            SortDirection::Desc => ordering != Ordering::Less,
        }
    })
}
