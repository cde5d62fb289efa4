use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPenToSquare, FaPlus};
use dioxus_free_icons::Icon;

use crate::{
    client::{
        components::{CheckboxField, DeleteButton, ImageField, Page, Pagination, ReferenceSelect, TextField},
        router::Route,
        store::{AlertState, Services},
        util::use_invalidation,
    },
    error::{Error, ValidationErrors},
    form::addon::{AddonForm, AddonVariationInput},
    model::{
        catalog::{AddonDto, AddonType},
        reference::ItemKind,
    },
    service::CatalogService,
};

const ADDONS: &str = "addons";
const PAGE_SIZE: u32 = 20;

#[component]
pub fn Addons() -> Element {
    let services = use_context::<Services>();
    let mut page = use_signal(|| 1u32);

    let list = use_resource(move || {
        let services = services.clone();
        let page = page();
        async move {
            CatalogService::new(&services.client, &services.cache)
                .list::<AddonDto>(ADDONS, page, PAGE_SIZE)
                .await
        }
    });
    use_invalidation(ADDONS, list);

    rsx!(
        Page {
            title: "Addons",
            actions: rsx!(
                Link { to: Route::CreateAddon {}, class: "btn btn-primary btn-sm",
                    Icon { width: 14, height: 14, icon: FaPlus }
                    "Create Addon"
                }
            ),
            {match &*list.read_unchecked() {
                None => rsx!( div { class: "skeleton h-48 w-full" } ),
                Some(Err(e)) => rsx!( div { class: "alert alert-error", "{e.user_message()}" } ),
                Some(Ok(fetched)) => {
                    let response = fetched.clone().into_value();
                    let total_pages = response.as_ref().map(|r| r.total_pages()).unwrap_or(1);
                    let addons = response.map(|r| r.into_items()).unwrap_or_default();
                    rsx!(
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Type" }
                                    th { "Variations" }
                                    th {}
                                }
                            }
                            tbody {
                                for addon in addons {
                                    tr { key: "{addon.id}",
                                        td {
                                            p { "{addon.name_en}" }
                                            p { class: "text-sm opacity-60", dir: "rtl", "{addon.name_ar}" }
                                        }
                                        td { "{addon.addon_type.as_str()}" }
                                        td { "{addon.addon_variations.len()}" }
                                        td { class: "flex gap-1",
                                            Link {
                                                to: Route::EditAddon { id: addon.id },
                                                class: "btn btn-ghost btn-sm",
                                                Icon { width: 14, height: 14, icon: FaPenToSquare }
                                            }
                                            DeleteButton { resource: ADDONS, id: addon.id, name: addon.name_en.clone() }
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
pub fn CreateAddon() -> Element {
    rsx!(AddonEditor { id: None })
}

#[component]
pub fn EditAddon(id: i64) -> Element {
    rsx!(AddonEditor { id: Some(id) })
}

#[component]
pub fn AddonEditor(id: Option<i64>) -> Element {
    let services = use_context::<Services>();
    let mut alerts = use_context::<Signal<AlertState>>();
    let navigator = use_navigator();
    let mut form = use_signal(AddonForm::new);
    let mut errors = use_signal(ValidationErrors::new);
    let mut saving = use_signal(|| false);

    let load_services = services.clone();
    let existing = use_resource(move || {
        let services = load_services.clone();
        async move {
            let id = id?;
            match CatalogService::new(&services.client, &services.cache)
                .get::<AddonDto>(ADDONS, id)
                .await
            {
                Ok(fetched) => fetched.into_value(),
                Err(e) => {
                    alerts.write().error(e.user_message());
                    None
                }
            }
        }
    });
    use_effect(move || {
        if let Some(Some(addon)) = &*existing.read() {
            form.set(AddonForm::from_dto(addon));
        }
    });

    let submit = move |_| {
        let services = services.clone();
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
                    navigator.push(Route::Addons {});
                }
                Err(Error::ValidationError(invalid)) => errors.set(invalid),
                Err(e) => alerts.write().error(e.user_message()),
            }
        }
    };

    let field_error = move |field: &str| errors.read().for_field(field).map(str::to_string);
    let current = form();
    let title = if id.is_some() { "Edit Addon" } else { "Create Addon" };

    rsx!(
        Page { title: "{title}",
            div { class: "grid grid-cols-1 lg:grid-cols-2 gap-4",
                TextField {
                    label: "Name (English)",
                    value: current.name_en.clone(),
                    error: field_error("name_en"),
                    oninput: move |v| form.write().name_en = v,
                }
                TextField {
                    label: "Name (Arabic)",
                    value: current.name_ar.clone(),
                    rtl: true,
                    error: field_error("name_ar"),
                    oninput: move |v| form.write().name_ar = v,
                }
                TextField {
                    label: "Description (English)",
                    value: current.description_en.clone(),
                    multiline: true,
                    oninput: move |v| form.write().description_en = v,
                }
                TextField {
                    label: "Description (Arabic)",
                    value: current.description_ar.clone(),
                    multiline: true,
                    rtl: true,
                    oninput: move |v| form.write().description_ar = v,
                }
                label { class: "form-control",
                    span { class: "label-text", "Addon type" }
                    select {
                        class: "select select-bordered",
                        value: "{current.addon_type.as_str()}",
                        onchange: move |evt| {
                            if let Some(addon_type) = AddonType::parse(&evt.value()) {
                                form.write().addon_type = addon_type;
                            }
                        },
                        for addon_type in AddonType::ALL {
                            option { value: "{addon_type.as_str()}", "{addon_type.as_str()}" }
                        }
                    }
                }
            }
            ImageField {
                label: "Main image",
                image: current.main_image.clone(),
                on_change: move |image| form.write().main_image = image,
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
            if let Some(error) = field_error("addonVariations") {
                div { class: "alert alert-error", "{error}" }
            }
            for (index, variation) in current.variations.iter().cloned().enumerate() {
                AddonVariationCard {
                    key: "{index}",
                    index,
                    variation,
                    errors: errors(),
                    on_change: move |next: AddonVariationInput| {
                        if let Some(slot) = form.write().variations.get_mut(index) {
                            *slot = next;
                        }
                    },
                    on_default: move |_| form.write().set_default_variation(index),
                    on_remove: move |_| form.write().remove_variation(index),
                }
            }
            div { class: "flex justify-end gap-2",
                Link { to: Route::Addons {}, class: "btn", "Cancel" }
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
fn AddonVariationCard(
    index: usize,
    variation: AddonVariationInput,
    errors: ValidationErrors,
    on_change: EventHandler<AddonVariationInput>,
    on_default: EventHandler<()>,
    on_remove: EventHandler<()>,
) -> Element {
    let error = |field: &str| {
        errors
            .for_field(&format!("addonVariations.{}.{}", index, field))
            .map(str::to_string)
    };
    let base = variation.clone();
    let edit = move |change: fn(&mut AddonVariationInput, String)| {
        let variation = base.clone();
        move |value: String| {
            let mut next = variation.clone();
            change(&mut next, value);
            on_change.call(next);
        }
    };
    let stock = variation.clone();
    let size = variation.clone();
    let image = variation.clone();

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
                                checked: variation.is_default,
                                onchange: move |_| on_default.call(()),
                            }
                            span { class: "label-text", "Default" }
                        }
                        button { class: "btn btn-ghost btn-sm text-error", onclick: move |_| on_remove.call(()), "Remove" }
                    }
                }
                TextField { label: "SKU", value: variation.sku.clone(), error: error("sku"), oninput: edit(|v, s| v.sku = s) }
                TextField {
                    label: "Price",
                    input_type: "number",
                    value: variation.price.to_string(),
                    error: error("price"),
                    oninput: edit(|v, s| v.price = s.trim().parse().unwrap_or(0.0)),
                }
                TextField {
                    label: "Weight",
                    input_type: "number",
                    value: variation.weight.map(|w| w.to_string()).unwrap_or_default(),
                    error: error("weight"),
                    oninput: edit(|v, s| v.weight = s.trim().parse().ok()),
                }
                CheckboxField {
                    label: "In stock",
                    checked: variation.in_stock,
                    onchange: move |checked| {
                        let mut next = stock.clone();
                        next.in_stock = checked;
                        on_change.call(next);
                    },
                }
                ReferenceSelect {
                    label: "Size",
                    kind: ItemKind::AddonSizes,
                    value: variation.size_id,
                    onchange: move |id| {
                        let mut next = size.clone();
                        next.size_id = id;
                        on_change.call(next);
                    },
                }
                div { class: "md:col-span-3",
                    ImageField {
                        label: "Variation image",
                        image: variation.image.clone(),
                        on_change: move |picked| {
                            let mut next = image.clone();
                            next.image = picked;
                            on_change.call(next);
                        },
                    }
                }
            }
        }
    )
}
