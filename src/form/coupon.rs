use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::{
    error::ValidationErrors,
    form::{payload::Payload, FormEditor},
    model::reference::CouponDto,
};

/// Coupon dialog. Numeric fields keep the raw text typed by the operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponForm {
    pub name: String,
    pub code: String,
    /// Percentage, `0 < discount <= 100`.
    pub discount: String,
    pub expiry_date: Option<NaiveDate>,
    /// Empty means unlimited.
    pub max_uses: String,
    pub is_special: bool,
    pub special_customer: String,
    pub special_email: String,
    pub special_phone: String,
}

impl CouponForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dto(coupon: &CouponDto) -> Self {
        let max_uses = match &coupon.max_uses {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Self {
            name: coupon.name.clone(),
            code: coupon.code.clone(),
            discount: coupon.discount.to_string(),
            expiry_date: coupon.expiry_date.map(|d| d.date_naive()),
            max_uses,
            is_special: coupon.is_special,
            special_customer: coupon.special_customer.clone().unwrap_or_default(),
            special_email: coupon.special_email.clone().unwrap_or_default(),
            special_phone: coupon.special_phone.clone().unwrap_or_default(),
        }
    }

    fn parsed_discount(&self) -> Option<f64> {
        self.discount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0 && *d <= 100.0)
    }

    /// `Ok(None)` when left empty.
    fn parsed_max_uses(&self) -> Result<Option<u32>, ()> {
        let raw = self.max_uses.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => Err(()),
        }
    }
}

impl FormEditor for CouponForm {
    fn resource(&self) -> &'static str {
        "coupons"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if self.code.trim().is_empty() {
            errors.add("code", "Code is required");
        }
        if self.parsed_discount().is_none() {
            errors.add("discount", "Discount must be a number between 0 and 100");
        }
        if self.parsed_max_uses().is_err() {
            errors.add("maxUses", "Max uses must be a whole number of at least 1");
        }
        if self.is_special && self.special_customer.trim().is_empty() {
            errors.add("specialCustomer", "Special coupons need a customer name");
        }

        errors.into_result()
    }

    fn build_payload(&self) -> Result<Payload, ValidationErrors> {
        self.validate()?;

        let mut body = Map::new();
        body.insert("name".into(), json!(self.name.trim()));
        body.insert("code".into(), json!(self.code.trim()));
        body.insert("discount".into(), json!(self.parsed_discount()));
        body.insert(
            "expiryDate".into(),
            json!(self.expiry_date.and_then(|date| {
                date.and_hms_opt(0, 0, 0)
                    .map(|naive| Utc.from_utc_datetime(&naive).to_rfc3339())
            })),
        );
        if let Ok(Some(max_uses)) = self.parsed_max_uses() {
            body.insert("maxUses".into(), json!(max_uses));
        }
        body.insert("isSpecial".into(), json!(self.is_special));
        if self.is_special {
            body.insert("specialCustomer".into(), json!(self.special_customer.trim()));
            body.insert("specialEmail".into(), json!(self.special_email.trim()));
            body.insert("specialPhone".into(), json!(self.special_phone.trim()));
        }

        Ok(Payload::Json(Value::Object(body)))
    }
}
