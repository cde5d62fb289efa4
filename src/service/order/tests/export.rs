use crate::service::order::export::{export_rows, orders_workbook, EXPORT_COLUMNS};

use super::*;

/// Expect each shown order to map to one formatted row in local time
#[test]
fn maps_orders_to_rows() {
    let orders = vec![
        with_coupon(make_order(12, OrderStatus::Paid, at(2025, 6, 7, 10, 5), 250.0), "SPRING"),
        make_order(11, OrderStatus::PendingPayment, at(2025, 6, 6, 21, 30), 99.5),
    ];

    let rows = export_rows(&orders, gst());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].order_number, 12);
    assert_eq!(rows[0].customer, "Customer 12");
    assert_eq!(rows[0].date, "07-Jun");
    assert_eq!(rows[0].time, "02:05 PM");
    assert_eq!(rows[0].total, "AED250");
    assert_eq!(rows[0].coupon, "SPRING");
    assert_eq!(rows[0].status, "PAID");

    // 21:30 UTC is already the next day in the shop's timezone.
    assert_eq!(rows[1].date, "07-Jun");
    assert_eq!(rows[1].time, "01:30 AM");
    assert_eq!(rows[1].total, "AED99.5");
    assert_eq!(rows[1].coupon, "-");
    assert_eq!(rows[1].status, "PENDING PAYMENT");
}

/// Expect a readable workbook even when no orders are shown
#[test]
fn builds_workbook() {
    let empty = orders_workbook(&[]).unwrap();
    let rows = export_rows(&[make_order(1, OrderStatus::Paid, Utc::now(), 10.0)], gst());
    let filled = orders_workbook(&rows).unwrap();

    assert!(empty.starts_with(b"PK"));
    assert!(filled.starts_with(b"PK"));
    assert_eq!(EXPORT_COLUMNS.len(), 7);
}

/// Expect only the admin screen to offer the download
#[test]
fn export_is_admin_only() {
    assert!(ListVariant::AllOrders.allows_export());
    assert!(!ListVariant::DailyOrders.allows_export());
}
