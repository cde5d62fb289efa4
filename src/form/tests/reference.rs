use crate::model::reference::{ItemKind, ReferenceItemDto};

use super::*;

/// Expect plain collections to submit both names as JSON
#[test]
fn category_is_json() {
    let mut form = ReferenceItemForm::new(ItemKind::Categories);
    form.name_en = " Bouquets ".to_string();
    form.name_ar = "باقات".to_string();

    let payload = form.build_payload().unwrap();
    assert_eq!(form.resource(), "categories");
    assert_eq!(
        payload.as_json().unwrap(),
        &serde_json::json!({"name_en": "Bouquets", "name_ar": "باقات"})
    );
}

/// Expect both names to be required
#[test]
fn names_required() {
    let mut form = ReferenceItemForm::new(ItemKind::Tags);
    form.name_en = "Love".to_string();

    let errors = form.validate().unwrap_err();
    assert_eq!(
        errors.for_field("name"),
        Some("Both English and Arabic names are required.")
    );
}

/// Expect colors to require a swatch and an image and to submit multipart
#[test]
fn color_requires_image() {
    let mut form = ReferenceItemForm::new(ItemKind::BoxColors);
    form.name_en = "Red".to_string();
    form.name_ar = "أحمر".to_string();
    form.color = "red".to_string();

    let errors = form.validate().unwrap_err();
    assert!(errors.has("color"));
    assert!(errors.has("image"));

    form.color = "#ff0000".to_string();
    form.image.file = Some(jpeg("red.jpg"));
    form.image.alt_text_en = "Red box".to_string();

    let payload = form.build_payload().unwrap();
    let body = payload.as_multipart().unwrap();
    assert_eq!(form.resource(), "boxColors");
    assert_eq!(body.get_text("color"), Some("#ff0000"));
    assert_eq!(body.files("image").len(), 1);
    assert_eq!(body.get_text("altText_en"), Some("Red box"));
    assert_eq!(body.get_text("altText_ar"), Some(""));
}

/// Expect an existing color image to satisfy validation when editing
#[test]
fn stored_color_keeps_image() {
    let item: ReferenceItemDto = serde_json::from_value(serde_json::json!({
        "id": 4,
        "name_en": "Gold",
        "name_ar": "ذهبي",
        "color": "#d4af37",
        "image": { "url": "https://cdn.example.com/gold.jpg" }
    }))
    .unwrap();

    let form = ReferenceItemForm::from_dto(ItemKind::WrappingColors, &item);

    assert!(form.validate().is_ok());
    assert!(form.build_payload().unwrap().is_multipart());
}
