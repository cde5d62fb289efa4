mod addon;
mod product;
mod reference;

use blossom_test_utils::prelude::*;

use crate::form::payload::{Attachment, PartValue};

use super::*;

fn jpeg(name: &str) -> Attachment {
    Attachment::new(name, "image/jpeg", vec![0xff, 0xd8, 0xff])
}

/// Expect exactly one default after normalization
#[test]
fn normalize_defaults_keeps_first_flagged() {
    let mut flags = [false, true, true];
    normalize_defaults(flags.iter_mut());
    assert_eq!(flags, [false, true, false]);

    let mut none = [false, false];
    normalize_defaults(none.iter_mut());
    assert_eq!(none, [true, false]);
}

/// Expect an image without a file or alt text to serialize as null
#[test]
fn empty_image_is_null() {
    assert_eq!(ImageInput::default().to_json(), serde_json::Value::Null);

    let image = ImageInput {
        existing_url: Some("https://cdn.example.com/a.jpg".to_string()),
        alt_text_en: "A".to_string(),
        ..ImageInput::default()
    };
    assert_eq!(image.to_json()["url"], "https://cdn.example.com/a.jpg");
    assert_eq!(image.to_json()["altText_en"], "A");
}
