//! Wire models shared by the REST client, the notification channels and the UI.
//!
//! Field names follow the API's camelCase JSON; bilingual fields keep the
//! `_en`/`_ar` suffixes the API uses.

pub mod api;
pub mod catalog;
pub mod notification;
pub mod order;
pub mod reference;
pub mod user;

pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts a JSON number or a numeric string.
    ///
    /// Monetary columns are serialized as decimal strings by the API.
    pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| serde::de::Error::custom("number out of range")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid decimal {:?}: {}", s, e))),
            other => Err(serde::de::Error::custom(format!(
                "expected number or numeric string, got {}",
                other
            ))),
        }
    }

    pub fn opt_f64_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid decimal {:?}: {}", s, e))),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected number or numeric string, got {}",
                other
            ))),
        }
    }
}
