use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::de;

/// Lifecycle status of an order, as the API spells it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    PaymentFailed,
    Paid,
    Processing,
    OnDelivery,
    Delivered,
    Cancelled,
    CashPayment,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        Self::PendingPayment,
        Self::PaymentFailed,
        Self::Paid,
        Self::Processing,
        Self::OnDelivery,
        Self::Delivered,
        Self::Cancelled,
        Self::CashPayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "PENDING_PAYMENT",
            Self::PaymentFailed => "PAYMENT_FAILED",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::OnDelivery => "ON_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::CashPayment => "CASH_PAYMENT",
        }
    }

    /// Human readable label, e.g. `ON DELIVERY`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Transitions into these statuses must record which handler processed the order.
    pub fn requires_handler(&self) -> bool {
        matches!(self, Self::Processing | Self::OnDelivery | Self::Cancelled)
    }

    /// Badge background used by the order tables.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::PendingPayment => "bg-yellow-500",
            Self::PaymentFailed => "bg-red-500",
            Self::Paid => "bg-green-500",
            Self::Processing => "bg-blue-500",
            Self::OnDelivery => "bg-purple-500",
            Self::Delivered => "bg-gray-500",
            Self::Cancelled => "bg-red-700",
            Self::CashPayment => "bg-green-700",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status {:?}", s))
    }
}

/// Operators who may be recorded as having processed an order transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderHandler {
    Hind,
    Rukaiya,
    Kris,
    Fatima,
}

impl OrderHandler {
    pub const ALL: [OrderHandler; 4] = [Self::Hind, Self::Rukaiya, Self::Kris, Self::Fatima];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hind => "HIND",
            Self::Rukaiya => "RUKAIYA",
            Self::Kris => "KRIS",
            Self::Fatima => "FATIMA",
        }
    }
}

impl fmt::Display for OrderHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderHandler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|handler| handler.as_str() == s)
            .ok_or_else(|| format!("unknown order handler {:?}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCouponDto {
    #[serde(deserialize_with = "de::f64_from_any")]
    pub discount: f64,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressDto {
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A bilingual name as embedded in order line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedNameDto {
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProductDto {
    pub id: i64,
    #[serde(default, rename = "name_en")]
    pub name_en: String,
    #[serde(default, rename = "name_ar")]
    pub name_ar: String,
    #[serde(default)]
    pub category: Option<LocalizedNameDto>,
    #[serde(default)]
    pub main_image: Option<OrderItemImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemImageDto {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemVariationDto {
    #[serde(default)]
    pub size: Option<LocalizedNameDto>,
    #[serde(default)]
    pub infinity_color: Option<LocalizedNameDto>,
    #[serde(default)]
    pub box_color: Option<LocalizedNameDto>,
    #[serde(default)]
    pub wrapping_color: Option<LocalizedNameDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemAddonDto {
    pub id: String,
    pub quantity: u32,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub price: f64,
    pub addon: LocalizedNameDto,
    #[serde(default)]
    pub addon_variation: Option<OrderItemVariationDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: String,
    pub quantity: u32,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub price: f64,
    pub product: OrderItemProductDto,
    #[serde(default)]
    pub product_variation: OrderItemVariationDto,
    #[serde(default)]
    pub addons: Vec<OrderItemAddonDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub processed_by: Option<OrderHandler>,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub total: f64,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub tax_info: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: ShippingAddressDto,
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
    #[serde(default)]
    pub coupon: Option<OrderCouponDto>,
    #[serde(default)]
    pub card_message: Option<String>,
}

impl OrderDto {
    /// Coupon code shown in the tables, if the order used a coupon.
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon.as_ref().and_then(|c| c.code.as_deref())
    }

    /// Whether the order was created within `window` of `now`.
    pub fn is_new(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let age = now.signed_duration_since(self.created_at);
        age >= Duration::zero() && age <= window
    }
}

/// One page of `GET /orders/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPageDto {
    pub items: Vec<OrderDto>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "default_total_pages")]
    pub current_page: u32,
}

fn default_total_pages() -> u32 {
    1
}

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<OrderHandler>,
}
