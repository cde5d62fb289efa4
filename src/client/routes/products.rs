use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPenToSquare, FaPlus};
use dioxus_free_icons::Icon;

use crate::{
    client::{
        components::{
            use_reference_items, CheckboxField, DeleteButton, ImageField, Page, Pagination,
            ReferenceSelect, TextField,
        },
        router::Route,
        store::{AlertState, Services},
        util::use_invalidation,
    },
    error::{Error, ValidationErrors},
    form::product::{ProductForm, VariationInput},
    model::{
        catalog::{AddonDto, ProductDto, ProductStatus, ProductType},
        reference::ItemKind,
    },
    service::CatalogService,
};

const PRODUCTS: &str = "products";
const PAGE_SIZE: u32 = 20;

#[component]
pub fn Products() -> Element {
    let services = use_context::<Services>();
    let mut page = use_signal(|| 1u32);

    let list = use_resource(move || {
        let services = services.clone();
        let page = page();
        async move {
            CatalogService::new(&services.client, &services.cache)
                .list::<ProductDto>(PRODUCTS, page, PAGE_SIZE)
                .await
        }
    });
    use_invalidation(PRODUCTS, list);

    rsx!(
        Page {
            title: "Products",
            actions: rsx!(
                Link { to: Route::CreateProduct {}, class: "btn btn-primary btn-sm",
                    Icon { width: 14, height: 14, icon: FaPlus }
                    "Create Product"
                }
            ),
            {match &*list.read_unchecked() {
                None => rsx!( div { class: "skeleton h-48 w-full" } ),
                Some(Err(e)) => rsx!( div { class: "alert alert-error", "{e.user_message()}" } ),
                Some(Ok(fetched)) => {
                    let response = fetched.clone().into_value();
                    let total_pages = response.as_ref().map(|r| r.total_pages()).unwrap_or(1);
                    let products = response.map(|r| r.into_items()).unwrap_or_default();
                    rsx!(
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Type" }
                                    th { "Status" }
                                    th { "Variations" }
                                    th {}
                                }
                            }
                            tbody {
                                for product in products {
                                    tr { key: "{product.id}",
                                        td {
                                            p { "{product.name_en}" }
                                            p { class: "text-sm opacity-60", dir: "rtl", "{product.name_ar}" }
                                        }
                                        td { "{product.product_type.as_str()}" }
                                        td { "{product.status.as_str()}" }
                                        td { "{product.variations.len()}" }
                                        td { class: "flex gap-1",
                                            Link {
                                                to: Route::EditProduct { id: product.id },
                                                class: "btn btn-ghost btn-sm",
                                                Icon { width: 14, height: 14, icon: FaPenToSquare }
                                            }
                                            DeleteButton { resource: PRODUCTS, id: product.id, name: product.name_en.clone() }
                                        }
                                    }
                                }
                            }
                        }
                        Pagination {
                            page: page(),
                            total_pages,
                            on_change: move |next| page.set(next),
                        }
                    )
                }
            }}
        }
    )
}

#[component]
pub fn CreateProduct() -> Element {
    rsx!(ProductEditor { id: None })
}

#[component]
pub fn EditProduct(id: i64) -> Element {
    rsx!(ProductEditor { id: Some(id) })
}

fn parse_price(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

fn parse_optional(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Create and edit screen shared by both product routes.
#[component]
pub fn ProductEditor(id: Option<i64>) -> Element {
    let services = use_context::<Services>();
    let mut alerts = use_context::<Signal<AlertState>>();
    let navigator = use_navigator();
    let mut form = use_signal(ProductForm::new);
    let mut errors = use_signal(ValidationErrors::new);
    let mut saving = use_signal(|| false);
    let tags = use_reference_items(ItemKind::Tags);

    let load_services = services.clone();
    let existing = use_resource(move || {
        let services = load_services.clone();
        async move {
            let id = id?;
            let fetched = CatalogService::new(&services.client, &services.cache)
                .get::<ProductDto>(PRODUCTS, id)
                .await;
            match fetched {
                Ok(fetched) => fetched.into_value(),
                Err(e) => {
                    alerts.write().error(e.user_message());
                    None
                }
            }
        }
    });
    use_effect(move || {
        if let Some(Some(product)) = &*existing.read() {
            form.set(ProductForm::from_dto(product));
        }
    });

    let addon_services = services.clone();
    let addons = use_resource(move || {
        let services = addon_services.clone();
        async move {
            CatalogService::new(&services.client, &services.cache)
                .list::<AddonDto>("addons", 1, 100)
                .await
                .ok()
                .and_then(|fetched| fetched.into_value())
                .map(|list| list.into_items())
                .unwrap_or_default()
        }
    });

    let submit_services = services.clone();
    let submit = move |_| {
        let services = submit_services.clone();
        let snapshot = form();
        async move {
            saving.set(true);
            let result = CatalogService::new(&services.client, &services.cache)
                .submit(&snapshot, id)
                .await;
            saving.set(false);

            match result {
                Ok(_) => {
                    errors.set(ValidationErrors::new());
                    alerts.write().info("Saved", format!("{} was saved.", snapshot.name_en.trim()));
                    navigator.push(Route::Products {});
                }
                Err(Error::ValidationError(invalid)) => errors.set(invalid),
                Err(e) => alerts.write().error(e.user_message()),
            }
        }
    };

    let field_error = move |field: &str| errors.read().for_field(field).map(str::to_string);
    let current = form();
    let title = if id.is_some() { "Edit Product" } else { "Create Product" };

    rsx!(
        Page { title: "{title}",
            div { class: "grid grid-cols-1 lg:grid-cols-2 gap-4",
                TextField { label: "Code", value: current.code.clone(), oninput: move |v| form.write().code = v }
                TextField {
                    label: "Slug",
                    value: current.slug.clone(),
                    error: field_error("slug"),
                    oninput: move |v| form.write().slug = v,
                }
                TextField {
                    label: "Name (EN)",
                    value: current.name_en.clone(),
                    error: field_error("name_en"),
                    oninput: move |v| form.write().name_en = v,
                }
                TextField {
                    label: "Name (AR)",
                    value: current.name_ar.clone(),
                    rtl: true,
                    error: field_error("name_ar"),
                    oninput: move |v| form.write().name_ar = v,
                }
                TextField {
                    label: "Short description (EN)",
                    value: current.short_description_en.clone(),
                    multiline: true,
                    error: field_error("shortDescription_en"),
                    oninput: move |v| form.write().short_description_en = v,
                }
                TextField {
                    label: "Short description (AR)",
                    value: current.short_description_ar.clone(),
                    multiline: true,
                    rtl: true,
                    error: field_error("shortDescription_ar"),
                    oninput: move |v| form.write().short_description_ar = v,
                }
                TextField {
                    label: "Long description (EN)",
                    value: current.long_description_en.clone(),
                    multiline: true,
                    error: field_error("longDescription_en"),
                    oninput: move |v| form.write().long_description_en = v,
                }
                TextField {
                    label: "Long description (AR)",
                    value: current.long_description_ar.clone(),
                    multiline: true,
                    rtl: true,
                    error: field_error("longDescription_ar"),
                    oninput: move |v| form.write().long_description_ar = v,
                }
                TextField { label: "Meta title (EN)", value: current.meta_title_en.clone(), oninput: move |v| form.write().meta_title_en = v }
                TextField { label: "Meta title (AR)", value: current.meta_title_ar.clone(), rtl: true, oninput: move |v| form.write().meta_title_ar = v }
                TextField { label: "Meta description (EN)", value: current.meta_description_en.clone(), multiline: true, oninput: move |v| form.write().meta_description_en = v }
                TextField { label: "Meta description (AR)", value: current.meta_description_ar.clone(), multiline: true, rtl: true, oninput: move |v| form.write().meta_description_ar = v }
                label { class: "form-control",
                    span { class: "label-text", "Status" }
                    select {
                        class: "select select-bordered",
                        value: "{current.status.as_str()}",
                        onchange: move |evt| {
                            if let Some(status) = ProductStatus::parse(&evt.value()) {
                                form.write().status = status;
                            }
                        },
                        for status in ProductStatus::ALL {
                            option { value: "{status.as_str()}", "{status.as_str()}" }
                        }
                    }
                }
                label { class: "form-control",
                    span { class: "label-text", "Product type" }
                    select {
                        class: "select select-bordered",
                        value: "{current.product_type.as_str()}",
                        onchange: move |evt| {
                            if let Some(product_type) = ProductType::parse(&evt.value()) {
                                form.write().product_type = product_type;
                            }
                        },
                        for product_type in ProductType::ALL {
                            option { value: "{product_type.as_str()}", "{product_type.as_str()}" }
                        }
                    }
                }
                ReferenceSelect {
                    label: "Category",
                    kind: ItemKind::Categories,
                    value: current.category_id,
                    error: field_error("categoryId"),
                    onchange: move |v| form.write().category_id = v,
                }
                CheckboxField { label: "Featured", checked: current.featured, onchange: move |v| form.write().featured = v }
            }
            ImageField {
                label: "Main image",
                image: current.main_image.clone(),
                error: field_error("mainImage"),
                on_change: move |image| form.write().main_image = image,
            }
            div { class: "flex flex-col gap-2",
                h2 { class: "text-lg font-semibold", "Tags" }
                div { class: "flex flex-wrap gap-2",
                    if let Some(tags) = &*tags.read_unchecked() {
                        for tag in tags.iter().cloned() {
                            CheckboxField {
                                key: "{tag.id}",
                                label: tag.name_en.clone(),
                                checked: current.tag_ids.contains(&tag.id),
                                onchange: move |_| form.write().toggle_tag(tag.id),
                            }
                        }
                    }
                }
                h2 { class: "text-lg font-semibold", "Addons" }
                div { class: "flex flex-wrap gap-2",
                    if let Some(addons) = &*addons.read_unchecked() {
                        for addon in addons.iter().cloned() {
                            CheckboxField {
                                key: "{addon.id}",
                                label: addon.name_en.clone(),
                                checked: current.addon_ids.contains(&addon.id),
                                onchange: move |_| form.write().toggle_addon(addon.id),
                            }
                        }
                    }
                }
            }
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold", "Variations" }
                button {
                    class: "btn btn-sm",
                    onclick: move |_| form.write().add_variation(),
                    Icon { width: 14, height: 14, icon: FaPlus }
                    "Add variation"
                }
            }
            if let Some(error) = field_error("variations") {
                div { class: "alert alert-error", "{error}" }
            }
            for (index, variation) in current.variations.iter().cloned().enumerate() {
                VariationCard {
                    key: "{index}",
                    index,
                    variation,
                    errors: errors(),
                    on_change: move |next: VariationInput| {
                        if let Some(slot) = form.write().variations.get_mut(index) {
                            *slot = next;
                        }
                    },
                    on_default: move |_| form.write().set_default_variation(index),
                    on_remove: move |_| form.write().remove_variation(index),
                }
            }
            div { class: "flex justify-end gap-2",
                Link { to: Route::Products {}, class: "btn", "Cancel" }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: submit,
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    )
}

#[component]
fn VariationCard(
    index: usize,
    variation: VariationInput,
    errors: ValidationErrors,
    on_change: EventHandler<VariationInput>,
    on_default: EventHandler<()>,
    on_remove: EventHandler<()>,
) -> Element {
    let error = |field: &str| {
        errors
            .for_field(&format!("variations.{}.{}", index, field))
            .map(str::to_string)
    };
    let base = variation.clone();
    let edit = move |change: fn(&mut VariationInput, String)| {
        let variation = base.clone();
        move |value: String| {
            let mut next = variation.clone();
            change(&mut next, value);
            on_change.call(next);
        }
    };
    let v = variation.clone();

    rsx!(
        div { class: "card bg-base-200",
            div { class: "card-body grid grid-cols-1 md:grid-cols-3 gap-2",
                div { class: "md:col-span-3 flex items-center justify-between",
                    h3 { class: "font-semibold", "Variation {index + 1}" }
                    div { class: "flex items-center gap-2",
                        label { class: "label cursor-pointer gap-2",
                            input {
                                r#type: "radio",
                                class: "radio radio-sm",
                                checked: v.is_default,
                                onchange: move |_| on_default.call(()),
                            }
                            span { class: "label-text", "Default" }
                        }
                        button { class: "btn btn-ghost btn-sm text-error", onclick: move |_| on_remove.call(()), "Remove" }
                    }
                }
                TextField { label: "SKU", value: v.sku.clone(), error: error("sku"), oninput: edit(|v, s| v.sku = s) }
                TextField { label: "Barcode", value: v.barcode.clone(), oninput: edit(|v, s| v.barcode = s) }
                TextField {
                    label: "Price",
                    input_type: "number",
                    value: v.price.to_string(),
                    error: error("price"),
                    oninput: edit(|v, s| v.price = parse_price(&s)),
                }
                TextField {
                    label: "Previous price",
                    input_type: "number",
                    value: number_text(v.previous_price),
                    error: error("previousPrice"),
                    oninput: edit(|v, s| v.previous_price = parse_optional(&s)),
                }
                TextField {
                    label: "Weight",
                    input_type: "number",
                    value: number_text(v.weight),
                    error: error("weight"),
                    oninput: edit(|v, s| v.weight = parse_optional(&s)),
                }
                CheckboxField {
                    label: "In stock",
                    checked: v.in_stock,
                    onchange: {
                        let variation = variation.clone();
                        move |checked| {
                            let mut next = variation.clone();
                            next.in_stock = checked;
                            on_change.call(next);
                        }
                    },
                }
                VariationPicker { label: "Size", kind: ItemKind::ProductSizes, variation: variation.clone(), on_change }
                VariationPicker { label: "Infinity color", kind: ItemKind::InfinityColors, variation: variation.clone(), on_change }
                VariationPicker { label: "Box color", kind: ItemKind::BoxColors, variation: variation.clone(), on_change }
                VariationPicker { label: "Wrapping color", kind: ItemKind::WrappingColors, variation: variation.clone(), on_change }
                div { class: "md:col-span-3",
                    ImageField {
                        label: "Variation image",
                        image: v.image.clone(),
                        on_change: {
                            let variation = variation.clone();
                            move |image| {
                                let mut next = variation.clone();
                                next.image = image;
                                on_change.call(next);
                            }
                        },
                    }
                }
            }
        }
    )
}

#[component]
fn VariationPicker(
    label: String,
    kind: ItemKind,
    variation: VariationInput,
    on_change: EventHandler<VariationInput>,
) -> Element {
    let value = match kind {
        ItemKind::ProductSizes => variation.size_id,
        ItemKind::InfinityColors => variation.infinity_color_id,
        ItemKind::BoxColors => variation.box_color_id,
        _ => variation.wrapping_color_id,
    };

    rsx!(
        ReferenceSelect {
            label,
            kind,
            value,
            onchange: move |id| {
                let mut next = variation.clone();
                match kind {
                    ItemKind::ProductSizes => next.size_id = id,
                    ItemKind::InfinityColors => next.infinity_color_id = id,
                    ItemKind::BoxColors => next.box_color_id = id,
                    _ => next.wrapping_color_id = id,
                }
                on_change.call(next);
            },
        }
    )
}
