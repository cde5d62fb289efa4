use crate::model::catalog::AddonType;

use super::*;

fn valid_form() -> AddonForm {
    let mut form = AddonForm::new();
    form.name_en = "Gold balloon".to_string();
    form.name_ar = "بالون ذهبي".to_string();
    form.variations[0].sku = "BAL-1".to_string();
    form.variations[0].price = 25.0;
    form
}

/// Expect the balloon type to use the API spelling
#[test]
fn addon_type_wire_value() {
    let body = valid_form().build_payload().unwrap();
    assert_eq!(body.as_json().unwrap()["addonType"], "BALOONS");
    assert_eq!(AddonType::parse("CAKES"), Some(AddonType::Cakes));
}

/// Expect short names and negative weights to be rejected
#[test]
fn validation_reports_fields() {
    let mut form = valid_form();
    form.name_ar = "ب".to_string();
    form.variations[0].weight = Some(-0.5);

    let errors = form.validate().unwrap_err();
    assert_eq!(errors.for_field("name_ar"), Some("Name (Arabic) is required"));
    assert!(errors.has("addonVariations.0.weight"));
    assert!(!errors.has("name_en"));
}

/// Expect variation images to use the singular field name
#[test]
fn variation_images_use_singular_field() {
    let mut form = valid_form();
    form.add_variation();
    form.variations[1].sku = "BAL-2".to_string();
    form.variations[1].image.file = Some(jpeg("b.jpg"));
    form.variations[1].image.alt_text_en = "Silver".to_string();

    let payload = form.build_payload().unwrap();
    let body = payload.as_multipart().unwrap();

    assert_eq!(body.files("variationImage").len(), 1);
    assert!(body.files("variationImages").is_empty());
    assert_eq!(body.get_text("variationImageAltTextEn_1"), Some("Silver"));
    let variations: serde_json::Value =
        serde_json::from_str(body.get_text("addonVariations").unwrap()).unwrap();
    assert_eq!(variations[0]["isDefault"], true);
    assert_eq!(variations[1]["isDefault"], false);
}
