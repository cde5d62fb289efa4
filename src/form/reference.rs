use serde_json::json;

use crate::{
    error::ValidationErrors,
    form::{
        payload::{MultipartBody, Payload},
        FormEditor, ImageInput,
    },
    model::reference::{ItemKind, ReferenceItemDto},
};

/// Dialog used for categories, tags, sizes and the three color collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceItemForm {
    kind: ItemKind,
    pub name_en: String,
    pub name_ar: String,
    /// Swatch as `#rrggbb`; colors only.
    pub color: String,
    /// Colors only.
    pub image: ImageInput,
}

impl ReferenceItemForm {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            name_en: String::new(),
            name_ar: String::new(),
            color: "#000000".to_string(),
            image: ImageInput::default(),
        }
    }

    pub fn from_dto(kind: ItemKind, item: &ReferenceItemDto) -> Self {
        Self {
            kind,
            name_en: item.name_en.clone(),
            name_ar: item.name_ar.clone(),
            color: item.color.clone().unwrap_or_else(|| "#000000".to_string()),
            image: ImageInput::from_dto(item.image.as_ref()),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl FormEditor for ReferenceItemForm {
    fn resource(&self) -> &'static str {
        self.kind.resource()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name_en.trim().is_empty() || self.name_ar.trim().is_empty() {
            errors.add("name", "Both English and Arabic names are required.");
        }
        if self.kind.is_color() {
            if !is_hex_color(self.color.trim()) {
                errors.add("color", "Both color and image are required.");
            }
            if !self.image.has_image() {
                errors.add("image", "Both color and image are required.");
            }
        }

        errors.into_result()
    }

    /// Colors are always multipart, the other collections are JSON.
    fn build_payload(&self) -> Result<Payload, ValidationErrors> {
        self.validate()?;

        if !self.kind.is_color() {
            return Ok(Payload::Json(json!({
                "name_en": self.name_en.trim(),
                "name_ar": self.name_ar.trim(),
            })));
        }

        let mut body = MultipartBody::new();
        body.text("name_en", self.name_en.trim())
            .text("name_ar", self.name_ar.trim())
            .text("color", self.color.trim());
        if let Some(file) = &self.image.file {
            body.file("image", file.clone());
        }
        body.text("altText_en", self.image.alt_text_en.as_str())
            .text("altText_ar", self.image.alt_text_ar.as_str());

        Ok(Payload::Multipart(body))
    }
}
