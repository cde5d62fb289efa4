//! Form Editors.
//!
//! Each editor holds the raw field values of one create/edit screen,
//! validates them locally and turns them into a [`payload::Payload`]. Nothing
//! is sent while validation fails.

pub mod addon;
pub mod coupon;
pub mod payload;
pub mod product;
pub mod reference;

#[cfg(test)]
mod tests;

use serde_json::{json, Value};

use crate::{
    error::ValidationErrors,
    form::payload::{Attachment, Payload},
    model::catalog::ImageDto,
};

pub use addon::{AddonForm, AddonVariationInput};
pub use coupon::CouponForm;
pub use product::{ProductForm, VariationInput};
pub use reference::ReferenceItemForm;

/// An editor whose values can be submitted to a catalog resource.
pub trait FormEditor {
    /// REST resource path segment the form submits to.
    fn resource(&self) -> &'static str;

    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Validates, then builds the request body.
    fn build_payload(&self) -> Result<Payload, ValidationErrors>;
}

/// An image field: a newly picked file and/or the image already stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageInput {
    pub file: Option<Attachment>,
    /// URL of the stored image when editing.
    pub existing_url: Option<String>,
    pub alt_text_en: String,
    pub alt_text_ar: String,
}

impl ImageInput {
    pub fn from_dto(image: Option<&ImageDto>) -> Self {
        match image {
            Some(image) => Self {
                file: None,
                existing_url: Some(image.url.clone()),
                alt_text_en: image.alt_text_en.clone().unwrap_or_default(),
                alt_text_ar: image.alt_text_ar.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.file.is_some() || self.existing_url.is_some()
    }

    /// JSON form sent inside variation lists; files travel as separate parts.
    fn to_json(&self) -> Value {
        if !self.has_image() && self.alt_text_en.is_empty() && self.alt_text_ar.is_empty() {
            return Value::Null;
        }
        json!({
            "url": self.existing_url,
            "altText_en": self.alt_text_en,
            "altText_ar": self.alt_text_ar,
        })
    }
}

/// Leaves exactly one default: the first flagged one, or the first entry
/// when none is flagged.
pub(crate) fn normalize_defaults<'a>(flags: impl IntoIterator<Item = &'a mut bool>) {
    let mut flags: Vec<&mut bool> = flags.into_iter().collect();
    let keep = flags.iter().position(|flag| **flag).unwrap_or(0);

    for (index, flag) in flags.iter_mut().enumerate() {
        **flag = index == keep;
    }
}

/// Records an error when `value` is shorter than `min` characters.
pub(crate) fn require_len(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
) {
    if value.trim().chars().count() < min {
        errors.add(field, message);
    }
}

/// Records an error unless `value` is a finite number of at least zero.
pub(crate) fn require_non_negative(
    errors: &mut ValidationErrors,
    field: &str,
    value: f64,
    message: &str,
) {
    if !(value.is_finite() && value >= 0.0) {
        errors.add(field, message);
    }
}
