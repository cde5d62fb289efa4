use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// An order as returned by `GET /orders/all`, with one line item.
///
/// Monetary values are encoded as decimal strings, as the API sends them.
pub fn order_json(id: i64, status: &str, created_at: DateTime<Utc>, total: f64) -> Value {
    json!({
        "id": id,
        "createdAt": created_at.to_rfc3339(),
        "updatedAt": created_at.to_rfc3339(),
        "status": status,
        "processedBy": null,
        "total": format!("{:.2}", total),
        "subtotal": format!("{:.2}", total),
        "taxInfo": "0.00",
        "shippingCost": "0.00",
        "customerName": format!("Customer {}", id),
        "customerEmail": format!("customer{}@example.com", id),
        "customerPhone": "+971500000000",
        "shippingAddress": {
            "addressLine1": "1 Flower Street",
            "state": "Dubai",
            "country": "AE",
            "postalCode": "00000",
            "phone": "+971500000000"
        },
        "items": [{
            "id": format!("item-{}", id),
            "quantity": 1,
            "price": format!("{:.2}", total),
            "product": {
                "id": 1,
                "name_en": "Red Roses",
                "name_ar": "ورود حمراء",
                "category": { "name_en": "Bouquets", "name_ar": "باقات" },
                "mainImage": { "url": "https://cdn.example.com/roses.jpg" }
            },
            "productVariation": {
                "size": { "name_en": "Large", "name_ar": "كبير" }
            },
            "addons": []
        }],
        "coupon": null,
        "cardMessage": null
    })
}

/// Same as [`order_json`] with a coupon attached.
pub fn order_with_coupon_json(
    id: i64,
    status: &str,
    created_at: DateTime<Utc>,
    total: f64,
    code: &str,
) -> Value {
    let mut order = order_json(id, status, created_at, total);
    order["coupon"] = json!({ "discount": "10", "code": code });
    order
}

/// A page of `GET /orders/all`.
pub fn orders_page_json(items: Vec<Value>, total_pages: u32, current_page: u32) -> Value {
    let total_count = items.len();
    json!({
        "items": items,
        "totalPages": total_pages,
        "totalCount": total_count,
        "currentPage": current_page
    })
}
