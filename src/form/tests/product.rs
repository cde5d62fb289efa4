use blossom_test_utils::fixtures;
use serde_json::json;

use crate::model::catalog::ProductDto;

use super::*;

fn stored_product(variations: usize) -> ProductDto {
    serde_json::from_value(fixtures::catalog::product_json(5, variations)).unwrap()
}

fn valid_form() -> ProductForm {
    ProductForm::from_dto(&stored_product(1))
}

/// Expect a stored product with N variations to survive an edit round trip
#[test]
fn round_trip_keeps_variations_and_alt_text() {
    let form = ProductForm::from_dto(&stored_product(3));
    assert_eq!(form.variations.len(), 3);
    assert_eq!(form.category_id, Some(3));
    assert_eq!(form.tag_ids, vec![1, 2]);

    let payload = form.build_payload().unwrap();
    let body = payload.as_json().unwrap();

    assert_eq!(body["name_en"], "Red Roses");
    assert_eq!(body["categoryId"], 3);
    assert_eq!(body["mainImage"]["altText_en"], "Red roses");
    assert_eq!(body["mainImage"]["altText_ar"], "ورود حمراء");
    let variations = body["variations"].as_array().unwrap();
    assert_eq!(variations.len(), 3);
    assert_eq!(variations[1]["sku"], "SKU-5-1");
    assert_eq!(variations[1]["price"], 110.0);
    assert_eq!(body["tagIds"], json!([1, 2]));
}

/// Expect selecting a default to clear it on every sibling
#[test]
fn default_variation_is_exclusive() {
    let mut form = ProductForm::from_dto(&stored_product(3));

    form.set_default_variation(2);
    let defaults: Vec<bool> = form.variations.iter().map(|v| v.is_default).collect();
    assert_eq!(defaults, vec![false, false, true]);

    form.set_default_variation(9);
    let defaults: Vec<bool> = form.variations.iter().map(|v| v.is_default).collect();
    assert_eq!(defaults, vec![false, false, true]);
}

/// Expect the payload to carry exactly one default even if the draft has several or none
#[test]
fn payload_normalizes_defaults() {
    let mut form = ProductForm::from_dto(&stored_product(3));
    for variation in form.variations.iter_mut() {
        variation.is_default = true;
    }
    let body = form.build_payload().unwrap();
    let flags: Vec<bool> = body.as_json().unwrap()["variations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["isDefault"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![true, false, false]);

    for variation in form.variations.iter_mut() {
        variation.is_default = false;
    }
    let body = form.build_payload().unwrap();
    assert_eq!(body.as_json().unwrap()["variations"][0]["isDefault"], true);
}

/// Expect removing the default variation to promote the first remaining one
#[test]
fn removing_default_promotes_first() {
    let mut form = ProductForm::from_dto(&stored_product(3));
    form.remove_variation(0);

    assert_eq!(form.variations.len(), 2);
    assert!(form.variations[0].is_default);
    assert!(!form.variations[1].is_default);
}

/// Expect field-level errors for short texts, missing SKU and negative prices
#[test]
fn validation_reports_fields() {
    let mut form = ProductForm::new();
    form.name_en = "R".to_string();
    form.short_description_en = "short".to_string();
    form.variations[0].price = -1.0;

    let errors = form.validate().unwrap_err();

    assert_eq!(errors.for_field("name_en"), Some("Name (EN) is required"));
    assert!(errors.has("slug"));
    assert!(errors.has("shortDescription_en"));
    assert!(errors.has("longDescription_ar"));
    assert!(errors.has("variations.0.sku"));
    assert!(errors.has("variations.0.price"));
}

/// Expect a product without variations to be rejected
#[test]
fn requires_a_variation() {
    let mut form = valid_form();
    form.remove_variation(0);

    let errors = form.build_payload().unwrap_err();
    assert!(errors.has("variations"));
}

/// Expect attachments to switch the payload to the multipart layout
#[test]
fn files_produce_multipart() {
    let mut form = ProductForm::from_dto(&stored_product(3));
    form.main_image.file = Some(jpeg("main.jpg"));
    form.variations[1].image.file = Some(jpeg("v1.jpg"));
    form.variations[1].image.alt_text_en = "Pink".to_string();
    form.variations[1].image.alt_text_ar = "وردي".to_string();

    let payload = form.build_payload().unwrap();
    let body = payload.as_multipart().unwrap();

    assert_eq!(body.files("mainImage").len(), 1);
    assert_eq!(body.get_text("mainImageAltTextEn"), Some("Red roses"));
    assert_eq!(body.get_text("mainImageAltTextAr"), Some("ورود حمراء"));
    assert_eq!(body.files("variationImages").len(), 1);
    assert_eq!(body.get_text("variationImageAltTextEn_1"), Some("Pink"));
    assert_eq!(body.get_text("variationImageAltTextAr_1"), Some("وردي"));
    assert_eq!(body.get_text("variationImageAltTextEn_0"), None);
    assert_eq!(body.get_text("featured"), Some("false"));
    assert_eq!(body.get_text("productType"), Some("BOUQUET"));

    let variations: serde_json::Value =
        serde_json::from_str(body.get_text("variations").unwrap()).unwrap();
    assert_eq!(variations.as_array().unwrap().len(), 3);
    assert_eq!(body.get_text("tagIds"), Some("[1,2]"));
    assert_eq!(body.get_text("addonIds"), Some("[]"));
    assert!(body
        .parts
        .iter()
        .any(|p| p.name == "mainImage" && matches!(p.value, PartValue::File(_))));
}

/// Expect toggling a tag twice to leave the selection unchanged
#[test]
fn toggle_tag() {
    let mut form = valid_form();
    form.toggle_tag(7);
    assert_eq!(form.tag_ids, vec![1, 2, 7]);
    form.toggle_tag(7);
    assert_eq!(form.tag_ids, vec![1, 2]);
}
