use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::store::Services,
    model::reference::{ItemKind, ReferenceItemDto},
    service::CatalogService,
};

/// Largest page requested when filling a picker.
pub const PICKER_PAGE_SIZE: u32 = 100;

/// Loads every entry of a reference collection for pickers.
pub fn use_reference_items(kind: ItemKind) -> Resource<Vec<ReferenceItemDto>> {
    let services = use_context::<Services>();

    use_resource(move || {
        let services = services.clone();
        async move {
            let catalog = CatalogService::new(&services.client, &services.cache);
            match catalog
                .list::<ReferenceItemDto>(kind.resource(), 1, PICKER_PAGE_SIZE)
                .await
            {
                Ok(fetched) => fetched.into_value().map(|list| list.into_items()).unwrap_or_default(),
                Err(e) => {
                    tracing::error!("Failed to load {}: {}", kind.resource(), e);
                    Vec::new()
                }
            }
        }
    })
}

#[component]
pub fn ReferenceSelect(
    label: String,
    kind: ItemKind,
    value: Option<i64>,
    error: Option<String>,
    onchange: EventHandler<Option<i64>>,
) -> Element {
    let items = use_reference_items(kind);
    let selected = value.map(|id| id.to_string()).unwrap_or_default();

    rsx!(
        label { class: "form-control w-full",
            span { class: "label-text", "{label}" }
            select {
                class: "select select-bordered",
                value: "{selected}",
                onchange: move |evt| onchange.call(evt.value().parse::<i64>().ok()),
                option { value: "", "None" }
                if let Some(items) = &*items.read_unchecked() {
                    for item in items.iter() {
                        option {
                            key: "{item.id}",
                            value: "{item.id}",
                            selected: Some(item.id) == value,
                            "{item.name_en}"
                        }
                    }
                }
            }
            if let Some(error) = error {
                span { class: "label-text-alt text-error", "{error}" }
            }
        }
    )
}
