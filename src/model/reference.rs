use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{catalog::ImageDto, de};

/// Reference-data collections maintained from the items pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Categories,
    Tags,
    ProductSizes,
    AddonSizes,
    InfinityColors,
    BoxColors,
    WrappingColors,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        Self::Categories,
        Self::Tags,
        Self::ProductSizes,
        Self::AddonSizes,
        Self::InfinityColors,
        Self::BoxColors,
        Self::WrappingColors,
    ];

    /// Path segment of the REST resource.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tags => "tags",
            Self::ProductSizes => "productSizes",
            Self::AddonSizes => "addonSizes",
            Self::InfinityColors => "infinityColors",
            Self::BoxColors => "boxColors",
            Self::WrappingColors => "wrappingColors",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Categories => "Categories",
            Self::Tags => "Tags",
            Self::ProductSizes => "Product Sizes",
            Self::AddonSizes => "Addon Sizes",
            Self::InfinityColors => "Infinity Colors",
            Self::BoxColors => "Box Colors",
            Self::WrappingColors => "Wrapping Colors",
        }
    }

    /// Color collections carry a swatch and an image and are submitted as multipart.
    pub fn is_color(&self) -> bool {
        matches!(
            self,
            Self::InfinityColors | Self::BoxColors | Self::WrappingColors
        )
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.resource() == s)
            .ok_or_else(|| format!("unknown item kind {:?}", s))
    }
}

/// A category, tag, size or color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItemDto {
    pub id: i64,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub discount: f64,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_uses: Option<serde_json::Value>,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub special_customer: Option<String>,
    #[serde(default)]
    pub special_email: Option<String>,
    #[serde(default)]
    pub special_phone: Option<String>,
}
