use serde_json::{json, Value};

/// A published product with `variations` variations, the first one default.
pub fn product_json(id: i64, variations: usize) -> Value {
    let variations: Vec<Value> = (0..variations)
        .map(|i| {
            json!({
                "id": i as i64 + 1,
                "sku": format!("SKU-{}-{}", id, i),
                "barcode": null,
                "price": format!("{}.00", 100 + i * 10),
                "previousPrice": null,
                "inStock": true,
                "weight": "0.5",
                "sizeId": 1,
                "infinityColorId": null,
                "boxColorId": null,
                "wrappingColorId": null,
                "isDefault": i == 0,
                "image": null
            })
        })
        .collect();

    json!({
        "id": id,
        "code": format!("P{}", id),
        "name_en": "Red Roses",
        "name_ar": "ورود حمراء",
        "slug": "red-roses",
        "shortDescription_en": "Fresh red roses",
        "shortDescription_ar": "ورود حمراء طازجة",
        "longDescription_en": "A bouquet of fresh red roses",
        "longDescription_ar": "باقة من الورود الحمراء الطازجة",
        "featured": false,
        "status": "PUBLISHED",
        "productType": "BOUQUET",
        "categoryId": 3,
        "category": { "id": 3, "name_en": "Bouquets" },
        "mainImage": {
            "id": 9,
            "url": "https://cdn.example.com/roses.jpg",
            "altText_en": "Red roses",
            "altText_ar": "ورود حمراء"
        },
        "variations": variations,
        "tags": [1, { "id": 2 }],
        "addons": []
    })
}

/// A category, tag or size.
pub fn reference_item_json(id: i64, name_en: &str) -> Value {
    json!({
        "id": id,
        "name_en": name_en,
        "name_ar": format!("{} (ar)", name_en)
    })
}
