use serde::{Deserialize, Serialize};

use crate::model::de;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    LongLife,
    Bouquet,
    Arrangement,
    AcrylicBox,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        Self::LongLife,
        Self::Bouquet,
        Self::Arrangement,
        Self::AcrylicBox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongLife => "LONG_LIFE",
            Self::Bouquet => "BOUQUET",
            Self::Arrangement => "ARRANGEMENT",
            Self::AcrylicBox => "ACRYLIC_BOX",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Addon categories. `BALOONS` is the API's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddonType {
    #[serde(rename = "BALOONS")]
    Balloons,
    #[serde(rename = "CHOCOLATES")]
    Chocolates,
    #[serde(rename = "CAKES")]
    Cakes,
}

impl AddonType {
    pub const ALL: [AddonType; 3] = [Self::Balloons, Self::Chocolates, Self::Cakes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balloons => "BALOONS",
            Self::Chocolates => "CHOCOLATES",
            Self::Cakes => "CAKES",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub url: String,
    #[serde(default, rename = "altText_en")]
    pub alt_text_en: Option<String>,
    #[serde(default, rename = "altText_ar")]
    pub alt_text_ar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariationDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub price: f64,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub previous_price: Option<f64>,
    pub in_stock: bool,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub size_id: Option<i64>,
    #[serde(default)]
    pub infinity_color_id: Option<i64>,
    #[serde(default)]
    pub box_color_id: Option<i64>,
    #[serde(default)]
    pub wrapping_color_id: Option<i64>,
    pub is_default: bool,
    #[serde(default)]
    pub image: Option<ImageDto>,
}

/// The category summary embedded in product responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRefDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name_en: String,
}

/// Tags and addons come back either as ids or as embedded objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdRef {
    Id(i64),
    Object { id: i64 },
}

impl IdRef {
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) | Self::Object { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "name_en")]
    pub name_en: String,
    #[serde(rename = "name_ar")]
    pub name_ar: String,
    pub slug: String,
    #[serde(default, rename = "shortDescription_en")]
    pub short_description_en: String,
    #[serde(default, rename = "shortDescription_ar")]
    pub short_description_ar: String,
    #[serde(default, rename = "longDescription_en")]
    pub long_description_en: String,
    #[serde(default, rename = "longDescription_ar")]
    pub long_description_ar: String,
    #[serde(default, rename = "metaTitle_en")]
    pub meta_title_en: Option<String>,
    #[serde(default, rename = "metaTitle_ar")]
    pub meta_title_ar: Option<String>,
    #[serde(default, rename = "metaDescription_en")]
    pub meta_description_en: Option<String>,
    #[serde(default, rename = "metaDescription_ar")]
    pub meta_description_ar: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub status: ProductStatus,
    pub product_type: ProductType,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<CategoryRefDto>,
    #[serde(default)]
    pub main_image: Option<ImageDto>,
    #[serde(default)]
    pub variations: Vec<ProductVariationDto>,
    #[serde(default)]
    pub tags: Vec<IdRef>,
    #[serde(default)]
    pub addons: Vec<IdRef>,
}

impl ProductDto {
    /// Category id, taken from the embedded category when the flat id is absent.
    pub fn category_ref(&self) -> Option<i64> {
        self.category_id
            .or_else(|| self.category.as_ref().and_then(|c| c.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonVariationDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku: String,
    #[serde(deserialize_with = "de::f64_from_any")]
    pub price: f64,
    pub in_stock: bool,
    #[serde(default)]
    pub size_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64_from_any")]
    pub weight: Option<f64>,
    pub is_default: bool,
    #[serde(default)]
    pub image: Option<ImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonDto {
    pub id: i64,
    #[serde(rename = "name_en")]
    pub name_en: String,
    #[serde(rename = "name_ar")]
    pub name_ar: String,
    pub addon_type: AddonType,
    #[serde(default, rename = "description_en")]
    pub description_en: Option<String>,
    #[serde(default, rename = "description_ar")]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub main_image: Option<ImageDto>,
    #[serde(default)]
    pub addon_variations: Vec<AddonVariationDto>,
}
