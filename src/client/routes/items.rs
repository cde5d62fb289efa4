use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPenToSquare, FaPlus};
use dioxus_free_icons::Icon;

use crate::{
    client::{
        components::{DeleteButton, ImageField, Page, Pagination, TextField},
        store::{AlertState, Services},
        util::use_invalidation,
    },
    error::{Error, ValidationErrors},
    form::reference::ReferenceItemForm,
    model::reference::{ItemKind, ReferenceItemDto},
    service::CatalogService,
};

const PAGE_SIZE: u32 = 20;

/// Entity being edited in the dialog; `id` is `None` while creating.
#[derive(Debug, Clone, PartialEq)]
struct Editing {
    id: Option<i64>,
    form: ReferenceItemForm,
}

#[component]
pub fn ReferenceItems(kind: String) -> Element {
    match kind.parse::<ItemKind>() {
        Ok(kind) => rsx!( ReferenceItemList { key: "{kind}", kind } ),
        Err(_) => rsx!(
            Page { title: "Not Found",
                p { "There is no item collection called \"{kind}\"." }
            }
        ),
    }
}

#[component]
fn ReferenceItemList(kind: ItemKind) -> Element {
    let services = use_context::<Services>();
    let mut page = use_signal(|| 1u32);
    let mut editing = use_signal(|| None::<Editing>);

    let list = use_resource(move || {
        let services = services.clone();
        let page = page();
        async move {
            CatalogService::new(&services.client, &services.cache)
                .list::<ReferenceItemDto>(kind.resource(), page, PAGE_SIZE)
                .await
        }
    });
    use_invalidation(kind.resource(), list);

    rsx!(
        Page {
            title: "{kind.title()}",
            actions: rsx!(
                button {
                    class: "btn btn-primary btn-sm",
                    onclick: move |_| editing.set(Some(Editing { id: None, form: ReferenceItemForm::new(kind) })),
                    Icon { width: 14, height: 14, icon: FaPlus }
                    "Create"
                }
            ),
            {match &*list.read_unchecked() {
                None => rsx!( div { class: "skeleton h-48 w-full" } ),
                Some(Err(e)) => rsx!( div { class: "alert alert-error", "{e.user_message()}" } ),
                Some(Ok(fetched)) => {
                    let response = fetched.clone().into_value();
                    let total_pages = response.as_ref().map(|r| r.total_pages()).unwrap_or(1);
                    let items = response.map(|r| r.into_items()).unwrap_or_default();
                    rsx!(
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name (EN)" }
                                    th { "Name (AR)" }
                                    if kind.is_color() {
                                        th { "Color" }
                                    }
                                    th {}
                                }
                            }
                            tbody {
                                if items.is_empty() {
                                    tr {
                                        td { colspan: 4, class: "text-center opacity-60", "Nothing here yet." }
                                    }
                                }
                                for item in items {
                                    tr { key: "{item.id}",
                                        td { "{item.name_en}" }
                                        td { dir: "rtl", "{item.name_ar}" }
                                        if kind.is_color() {
                                            td {
                                                div { class: "flex items-center gap-2",
                                                    span {
                                                        class: "w-5 h-5 rounded border",
                                                        style: "background-color: {item.color.clone().unwrap_or_default()}",
                                                    }
                                                    if let Some(image) = &item.image {
                                                        img { class: "w-8 h-8 object-cover rounded", src: "{image.url}" }
                                                    }
                                                }
                                            }
                                        }
                                        td { class: "flex gap-1",
                                            button {
                                                class: "btn btn-ghost btn-sm",
                                                onclick: {
                                                    let item = item.clone();
                                                    move |_| editing.set(Some(Editing {
                                                        id: Some(item.id),
                                                        form: ReferenceItemForm::from_dto(kind, &item),
                                                    }))
                                                },
                                                Icon { width: 14, height: 14, icon: FaPenToSquare }
                                            }
                                            DeleteButton { resource: kind.resource(), id: item.id, name: item.name_en.clone() }
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
            if let Some(current) = editing() {
                ReferenceItemDialog {
                    editing: current,
                    on_close: move |_| editing.set(None),
                }
            }
        }
    )
}

#[component]
fn ReferenceItemDialog(editing: Editing, on_close: EventHandler<()>) -> Element {
    let services = use_context::<Services>();
    let mut alerts = use_context::<Signal<AlertState>>();
    let id = editing.id;
    let mut form = use_signal(|| editing.form.clone());
    let mut errors = use_signal(ValidationErrors::new);
    let mut saving = use_signal(|| false);

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
                    alerts.write().info("Saved", format!("{} was saved.", snapshot.name_en.trim()));
                    on_close.call(());
                }
                Err(Error::ValidationError(invalid)) => errors.set(invalid),
                Err(e) => alerts.write().error(e.user_message()),
            }
        }
    };

    let field_error = move |field: &str| errors.read().for_field(field).map(str::to_string);
    let current = form();
    let kind = current.kind();
    let heading = if id.is_some() { "Edit" } else { "Create" };

    rsx!(
        dialog { class: "modal modal-open",
            div { class: "modal-box flex flex-col gap-2",
                h3 { class: "font-bold text-lg", "{heading} {kind.title()}" }
                if let Some(error) = field_error("name") {
                    span { class: "text-error text-sm", "{error}" }
                }
                TextField {
                    label: "Name (English)",
                    value: current.name_en.clone(),
                    oninput: move |v| form.write().name_en = v,
                }
                TextField {
                    label: "Name (Arabic)",
                    value: current.name_ar.clone(),
                    rtl: true,
                    oninput: move |v| form.write().name_ar = v,
                }
                if kind.is_color() {
                    label { class: "form-control",
                        span { class: "label-text", "Color" }
                        input {
                            r#type: "color",
                            class: "w-16 h-10",
                            value: "{current.color}",
                            oninput: move |evt| form.write().color = evt.value(),
                        }
                        if let Some(error) = field_error("color") {
                            span { class: "label-text-alt text-error", "{error}" }
                        }
                    }
                    ImageField {
                        label: "Image",
                        image: current.image.clone(),
                        error: field_error("image"),
                        on_change: move |image| form.write().image = image,
                    }
                }
                div { class: "modal-action",
                    button { class: "btn", onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        class: "btn btn-primary",
                        disabled: saving(),
                        onclick: submit,
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    )
}
