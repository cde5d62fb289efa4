use serde_json::{json, Value};

use crate::{
    error::ValidationErrors,
    form::{
        normalize_defaults,
        payload::{MultipartBody, Payload},
        require_len, require_non_negative, FormEditor, ImageInput,
    },
    model::catalog::{AddonDto, AddonType, AddonVariationDto},
};

#[derive(Debug, Clone, PartialEq)]
pub struct AddonVariationInput {
    pub id: Option<i64>,
    pub sku: String,
    pub price: f64,
    pub in_stock: bool,
    pub size_id: Option<i64>,
    pub weight: Option<f64>,
    pub is_default: bool,
    pub image: ImageInput,
}

impl Default for AddonVariationInput {
    fn default() -> Self {
        Self {
            id: None,
            sku: String::new(),
            price: 0.0,
            in_stock: true,
            size_id: None,
            weight: None,
            is_default: false,
            image: ImageInput::default(),
        }
    }
}

impl From<&AddonVariationDto> for AddonVariationInput {
    fn from(dto: &AddonVariationDto) -> Self {
        Self {
            id: dto.id,
            sku: dto.sku.clone(),
            price: dto.price,
            in_stock: dto.in_stock,
            size_id: dto.size_id,
            weight: dto.weight,
            is_default: dto.is_default,
            image: ImageInput::from_dto(dto.image.as_ref()),
        }
    }
}

impl AddonVariationInput {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "sku": self.sku.trim(),
            "price": self.price,
            "inStock": self.in_stock,
            "sizeId": self.size_id,
            "weight": self.weight,
            "isDefault": self.is_default,
            "image": self.image.to_json(),
        })
    }
}

/// Addon create/edit screen (balloons, chocolates, cakes).
#[derive(Debug, Clone, PartialEq)]
pub struct AddonForm {
    pub name_en: String,
    pub name_ar: String,
    pub addon_type: AddonType,
    pub description_en: String,
    pub description_ar: String,
    pub main_image: ImageInput,
    pub variations: Vec<AddonVariationInput>,
}

impl Default for AddonForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddonForm {
    pub fn new() -> Self {
        Self {
            name_en: String::new(),
            name_ar: String::new(),
            addon_type: AddonType::Balloons,
            description_en: String::new(),
            description_ar: String::new(),
            main_image: ImageInput::default(),
            variations: vec![AddonVariationInput {
                is_default: true,
                ..AddonVariationInput::default()
            }],
        }
    }

    pub fn from_dto(addon: &AddonDto) -> Self {
        Self {
            name_en: addon.name_en.clone(),
            name_ar: addon.name_ar.clone(),
            addon_type: addon.addon_type,
            description_en: addon.description_en.clone().unwrap_or_default(),
            description_ar: addon.description_ar.clone().unwrap_or_default(),
            main_image: ImageInput::from_dto(addon.main_image.as_ref()),
            variations: addon
                .addon_variations
                .iter()
                .map(AddonVariationInput::from)
                .collect(),
        }
    }

    pub fn add_variation(&mut self) {
        let is_default = self.variations.is_empty();
        self.variations.push(AddonVariationInput {
            is_default,
            ..AddonVariationInput::default()
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

    fn variations_json(&self) -> Value {
        Value::Array(
            self.variations
                .iter()
                .map(AddonVariationInput::to_json)
                .collect(),
        )
    }

    fn to_json(&self) -> Value {
        json!({
            "name_en": self.name_en.trim(),
            "name_ar": self.name_ar.trim(),
            "addonType": self.addon_type.as_str(),
            "description_en": self.description_en,
            "description_ar": self.description_ar,
            "mainImage": self.main_image.to_json(),
            "addonVariations": self.variations_json(),
        })
    }

    fn to_multipart(&self) -> MultipartBody {
        let mut body = MultipartBody::new();

        body.text("name_en", self.name_en.trim())
            .text("name_ar", self.name_ar.trim())
            .text("addonType", self.addon_type.as_str())
            .text("description_en", self.description_en.as_str())
            .text("description_ar", self.description_ar.as_str());

        if let Some(file) = &self.main_image.file {
            body.file("mainImage", file.clone());
        }
        body.text("mainImageAltTextEn", self.main_image.alt_text_en.as_str())
            .text("mainImageAltTextAr", self.main_image.alt_text_ar.as_str());

        // The addon endpoint expects the singular `variationImage` field name.
        for (index, variation) in self.variations.iter().enumerate() {
            if let Some(file) = &variation.image.file {
                body.file("variationImage", file.clone())
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
        body.json("addonVariations", &self.variations_json());

        body
    }
}

impl FormEditor for AddonForm {
    fn resource(&self) -> &'static str {
        "addons"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_len(&mut errors, "name_en", &self.name_en, 2, "Name (English) is required");
        require_len(&mut errors, "name_ar", &self.name_ar, 2, "Name (Arabic) is required");

        if self.variations.is_empty() {
            errors.add("addonVariations", "At least one variation is required");
        }
        for (i, variation) in self.variations.iter().enumerate() {
            require_len(
                &mut errors,
                &format!("addonVariations.{}.sku", i),
                &variation.sku,
                1,
                "SKU is required",
            );
            require_non_negative(
                &mut errors,
                &format!("addonVariations.{}.price", i),
                variation.price,
                "Price must be a positive number",
            );
            if let Some(weight) = variation.weight {
                require_non_negative(
                    &mut errors,
                    &format!("addonVariations.{}.weight", i),
                    weight,
                    "Weight must be a positive number",
                );
            }
        }

        errors.into_result()
    }

    fn build_payload(&self) -> Result<Payload, ValidationErrors> {
        self.validate()?;

        let mut form = self.clone();
        normalize_defaults(form.variations.iter_mut().map(|v| &mut v.is_default));

        Ok(Payload::choose(form.to_json(), form.to_multipart()))
    }
}
