use serde_json::{json, Value};

use crate::{
    error::ValidationErrors,
    form::{
        normalize_defaults,
        payload::{MultipartBody, Payload},
        require_len, require_non_negative, FormEditor, ImageInput,
    },
    model::catalog::{ProductDto, ProductStatus, ProductType, ProductVariationDto},
};

/// One variation row of the product editor.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationInput {
    pub id: Option<i64>,
    pub sku: String,
    pub barcode: String,
    pub price: f64,
    pub previous_price: Option<f64>,
    pub in_stock: bool,
    pub weight: Option<f64>,
    pub size_id: Option<i64>,
    pub infinity_color_id: Option<i64>,
    pub box_color_id: Option<i64>,
    pub wrapping_color_id: Option<i64>,
    pub is_default: bool,
    pub image: ImageInput,
}

impl Default for VariationInput {
    fn default() -> Self {
        Self {
            id: None,
            sku: String::new(),
            barcode: String::new(),
            price: 0.0,
            previous_price: None,
            in_stock: true,
            weight: None,
            size_id: None,
            infinity_color_id: None,
            box_color_id: None,
            wrapping_color_id: None,
            is_default: false,
            image: ImageInput::default(),
        }
    }
}

impl From<&ProductVariationDto> for VariationInput {
    fn from(dto: &ProductVariationDto) -> Self {
        Self {
            id: dto.id,
            sku: dto.sku.clone(),
            barcode: dto.barcode.clone().unwrap_or_default(),
            price: dto.price,
            previous_price: dto.previous_price,
            in_stock: dto.in_stock,
            weight: dto.weight,
            size_id: dto.size_id,
            infinity_color_id: dto.infinity_color_id,
            box_color_id: dto.box_color_id,
            wrapping_color_id: dto.wrapping_color_id,
            is_default: dto.is_default,
            image: ImageInput::from_dto(dto.image.as_ref()),
        }
    }
}

impl VariationInput {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "sku": self.sku.trim(),
            "barcode": non_empty(&self.barcode),
            "price": self.price,
            "previousPrice": self.previous_price,
            "inStock": self.in_stock,
            "weight": self.weight,
            "sizeId": self.size_id,
            "infinityColorId": self.infinity_color_id,
            "boxColorId": self.box_color_id,
            "wrappingColorId": self.wrapping_color_id,
            "isDefault": self.is_default,
            "image": self.image.to_json(),
        })
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// Product create/edit screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub short_description_en: String,
    pub short_description_ar: String,
    pub long_description_en: String,
    pub long_description_ar: String,
    pub meta_title_en: String,
    pub meta_title_ar: String,
    pub meta_description_en: String,
    pub meta_description_ar: String,
    pub featured: bool,
    pub status: ProductStatus,
    pub product_type: ProductType,
    pub category_id: Option<i64>,
    pub main_image: ImageInput,
    pub variations: Vec<VariationInput>,
    pub tag_ids: Vec<i64>,
    pub addon_ids: Vec<i64>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// Empty draft with a single default variation.
    pub fn new() -> Self {
        Self {
            code: String::new(),
            name_en: String::new(),
            name_ar: String::new(),
            slug: String::new(),
            short_description_en: String::new(),
            short_description_ar: String::new(),
            long_description_en: String::new(),
            long_description_ar: String::new(),
            meta_title_en: String::new(),
            meta_title_ar: String::new(),
            meta_description_en: String::new(),
            meta_description_ar: String::new(),
            featured: false,
            status: ProductStatus::Draft,
            product_type: ProductType::Bouquet,
            category_id: None,
            main_image: ImageInput::default(),
            variations: vec![VariationInput {
                is_default: true,
                ..VariationInput::default()
            }],
            tag_ids: Vec::new(),
            addon_ids: Vec::new(),
        }
    }

    /// Pre-fills the editor from a stored product.
    pub fn from_dto(product: &ProductDto) -> Self {
        Self {
            code: product.code.clone().unwrap_or_default(),
            name_en: product.name_en.clone(),
            name_ar: product.name_ar.clone(),
            slug: product.slug.clone(),
            short_description_en: product.short_description_en.clone(),
            short_description_ar: product.short_description_ar.clone(),
            long_description_en: product.long_description_en.clone(),
            long_description_ar: product.long_description_ar.clone(),
            meta_title_en: product.meta_title_en.clone().unwrap_or_default(),
            meta_title_ar: product.meta_title_ar.clone().unwrap_or_default(),
            meta_description_en: product.meta_description_en.clone().unwrap_or_default(),
            meta_description_ar: product.meta_description_ar.clone().unwrap_or_default(),
            featured: product.featured,
            status: product.status,
            product_type: product.product_type,
            category_id: product.category_ref(),
            main_image: ImageInput::from_dto(product.main_image.as_ref()),
            variations: product.variations.iter().map(VariationInput::from).collect(),
            tag_ids: product.tags.iter().map(|t| t.id()).collect(),
            addon_ids: product.addons.iter().map(|a| a.id()).collect(),
        }
    }

    pub fn add_variation(&mut self) {
        let is_default = self.variations.is_empty();
        self.variations.push(VariationInput {
            is_default,
            ..VariationInput::default()
        });
    }

    pub fn remove_variation(&mut self, index: usize) {
        if index < self.variations.len() {
            self.variations.remove(index);
            if !self.variations.is_empty() {
                normalize_defaults(self.variations.iter_mut().map(|v| &mut v.is_default));
            }
        }
    }

    /// Makes variation `index` the only default.
    pub fn set_default_variation(&mut self, index: usize) {
        if index >= self.variations.len() {
            return;
        }
        for (i, variation) in self.variations.iter_mut().enumerate() {
            variation.is_default = i == index;
        }
    }

    pub fn toggle_tag(&mut self, tag_id: i64) {
        toggle(&mut self.tag_ids, tag_id);
    }

    pub fn toggle_addon(&mut self, addon_id: i64) {
        toggle(&mut self.addon_ids, addon_id);
    }

    fn normalized(&self) -> Self {
        let mut form = self.clone();
        normalize_defaults(form.variations.iter_mut().map(|v| &mut v.is_default));
        form
    }

    fn to_json(&self) -> Value {
        json!({
            "code": non_empty(&self.code),
            "name_en": self.name_en.trim(),
            "name_ar": self.name_ar.trim(),
            "slug": self.slug.trim(),
            "shortDescription_en": self.short_description_en,
            "shortDescription_ar": self.short_description_ar,
            "longDescription_en": self.long_description_en,
            "longDescription_ar": self.long_description_ar,
            "metaTitle_en": non_empty(&self.meta_title_en),
            "metaTitle_ar": non_empty(&self.meta_title_ar),
            "metaDescription_en": non_empty(&self.meta_description_en),
            "metaDescription_ar": non_empty(&self.meta_description_ar),
            "featured": self.featured,
            "status": self.status.as_str(),
            "productType": self.product_type.as_str(),
            "categoryId": self.category_id,
            "mainImage": self.main_image.to_json(),
            "variations": self.variations_json(),
            "tagIds": self.tag_ids,
            "addonIds": self.addon_ids,
        })
    }

    fn variations_json(&self) -> Value {
        Value::Array(self.variations.iter().map(VariationInput::to_json).collect())
    }

    fn to_multipart(&self) -> MultipartBody {
        let mut body = MultipartBody::new();

        if let Some(code) = non_empty(&self.code) {
            body.text("code", code);
        }
        body.text("name_en", self.name_en.trim())
            .text("name_ar", self.name_ar.trim())
            .text("slug", self.slug.trim())
            .text("shortDescription_en", self.short_description_en.as_str())
            .text("shortDescription_ar", self.short_description_ar.as_str())
            .text("longDescription_en", self.long_description_en.as_str())
            .text("longDescription_ar", self.long_description_ar.as_str())
            .text("metaTitle_en", self.meta_title_en.as_str())
            .text("metaTitle_ar", self.meta_title_ar.as_str())
            .text("metaDescription_en", self.meta_description_en.as_str())
            .text("metaDescription_ar", self.meta_description_ar.as_str())
            .text("featured", self.featured.to_string())
            .text("status", self.status.as_str())
            .text("productType", self.product_type.as_str());
        if let Some(category_id) = self.category_id {
            body.text("categoryId", category_id.to_string());
        }

        if let Some(file) = &self.main_image.file {
            body.file("mainImage", file.clone());
        }
        body.text("mainImageAltTextEn", self.main_image.alt_text_en.as_str())
            .text("mainImageAltTextAr", self.main_image.alt_text_ar.as_str());

        for (index, variation) in self.variations.iter().enumerate() {
            if let Some(file) = &variation.image.file {
                body.file("variationImages", file.clone())
                    .text(
                        format!("variationImageAltTextEn_{}", index),
                        variation.image.alt_text_en.as_str(),
                    )
                    .text(
                        format!("variationImageAltTextAr_{}", index),
                        variation.image.alt_text_ar.as_str(),
                    );
            }
        }

        body.json("variations", &self.variations_json())
            .json("tagIds", &json!(self.tag_ids))
            .json("addonIds", &json!(self.addon_ids));

        body
    }
}

fn toggle(ids: &mut Vec<i64>, id: i64) {
    if let Some(position) = ids.iter().position(|existing| *existing == id) {
        ids.remove(position);
    } else {
        ids.push(id);
    }
}

impl FormEditor for ProductForm {
    fn resource(&self) -> &'static str {
        "products"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_len(&mut errors, "name_en", &self.name_en, 2, "Name (EN) is required");
        require_len(&mut errors, "name_ar", &self.name_ar, 2, "Name (AR) is required");
        require_len(&mut errors, "slug", &self.slug, 2, "Slug is required");
        require_len(
            &mut errors,
            "shortDescription_en",
            &self.short_description_en,
            10,
            "Short description (EN) must be at least 10 characters",
        );
        require_len(
            &mut errors,
            "shortDescription_ar",
            &self.short_description_ar,
            10,
            "Short description (AR) must be at least 10 characters",
        );
        require_len(
            &mut errors,
            "longDescription_en",
            &self.long_description_en,
            20,
            "Long description (EN) must be at least 20 characters",
        );
        require_len(
            &mut errors,
            "longDescription_ar",
            &self.long_description_ar,
            20,
            "Long description (AR) must be at least 20 characters",
        );
        if matches!(self.category_id, Some(id) if id < 1) {
            errors.add("categoryId", "Select a valid category");
        }

        if self.variations.is_empty() {
            errors.add("variations", "At least one variation is required");
        }
        for (i, variation) in self.variations.iter().enumerate() {
            require_len(
                &mut errors,
                &format!("variations.{}.sku", i),
                &variation.sku,
                1,
                "SKU is required",
            );
            require_non_negative(
                &mut errors,
                &format!("variations.{}.price", i),
                variation.price,
                "Price must be a positive number",
            );
            if let Some(previous) = variation.previous_price {
                require_non_negative(
                    &mut errors,
                    &format!("variations.{}.previousPrice", i),
                    previous,
                    "Previous price must be a positive number",
                );
            }
            if let Some(weight) = variation.weight {
                require_non_negative(
                    &mut errors,
                    &format!("variations.{}.weight", i),
                    weight,
                    "Weight must be a positive number",
                );
            }
        }

        errors.into_result()
    }

    fn build_payload(&self) -> Result<Payload, ValidationErrors> {
        self.validate()?;
        let form = self.normalized();

        Ok(Payload::choose(form.to_json(), form.to_multipart()))
    }
}
