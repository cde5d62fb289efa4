use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPenToSquare, FaPlus};
use dioxus_free_icons::Icon;

use crate::{
    client::{
        components::{CheckboxField, DeleteButton, Page, Pagination, TextField},
        store::{AlertState, Services},
        util::use_invalidation,
    },
    error::{Error, ValidationErrors},
    form::coupon::CouponForm,
    model::reference::CouponDto,
    service::CatalogService,
};

const COUPONS: &str = "coupons";
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
struct Editing {
    id: Option<i64>,
    form: CouponForm,
}

fn max_uses_text(coupon: &CouponDto) -> String {
    match &coupon.max_uses {
        Some(serde_json::Value::Null) | None => "Unlimited".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[component]
pub fn Coupons() -> Element {
    let services = use_context::<Services>();
    let mut page = use_signal(|| 1u32);
    let mut editing = use_signal(|| None::<Editing>);

    let list = use_resource(move || {
        let services = services.clone();
        let page = page();
        async move {
            CatalogService::new(&services.client, &services.cache)
                .list::<CouponDto>(COUPONS, page, PAGE_SIZE)
                .await
        }
    });
    use_invalidation(COUPONS, list);

    rsx!(
        Page {
            title: "Coupons",
            actions: rsx!(
                button {
                    class: "btn btn-primary btn-sm",
                    onclick: move |_| editing.set(Some(Editing { id: None, form: CouponForm::new() })),
                    Icon { width: 14, height: 14, icon: FaPlus }
                    "Create Coupon"
                }
            ),
            {match &*list.read_unchecked() {
                None => rsx!( div { class: "skeleton h-48 w-full" } ),
                Some(Err(e)) => rsx!( div { class: "alert alert-error", "{e.user_message()}" } ),
                Some(Ok(fetched)) => {
                    let response = fetched.clone().into_value();
                    let total_pages = response.as_ref().map(|r| r.total_pages()).unwrap_or(1);
                    let coupons = response.map(|r| r.into_items()).unwrap_or_default();
                    rsx!(
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Code" }
                                    th { "Discount" }
                                    th { "Expires" }
                                    th { "Max uses" }
                                    th { "Special" }
                                    th {}
                                }
                            }
                            tbody {
                                for coupon in coupons {
                                    tr { key: "{coupon.id}",
                                        td { "{coupon.name}" }
                                        td { span { class: "badge badge-outline", "{coupon.code}" } }
                                        td { "{coupon.discount}%" }
                                        td {
                                            {coupon.expiry_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "Never".to_string())}
                                        }
                                        td { {max_uses_text(&coupon)} }
                                        td {
                                            if coupon.is_special {
                                                {coupon.special_customer.clone().unwrap_or_default()}
                                            }
                                        }
                                        td { class: "flex gap-1",
                                            button {
                                                class: "btn btn-ghost btn-sm",
                                                onclick: {
                                                    let coupon = coupon.clone();
                                                    move |_| editing.set(Some(Editing {
                                                        id: Some(coupon.id),
                                                        form: CouponForm::from_dto(&coupon),
                                                    }))
                                                },
                                                Icon { width: 14, height: 14, icon: FaPenToSquare }
                                            }
                                            DeleteButton { resource: COUPONS, id: coupon.id, name: coupon.code.clone() }
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
                CouponDialog {
                    editing: current,
                    on_close: move |_| editing.set(None),
                }
            }
        }
    )
}

#[component]
fn CouponDialog(editing: Editing, on_close: EventHandler<()>) -> Element {
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
                    alerts.write().info("Saved", format!("Coupon {} was saved.", snapshot.code.trim()));
                    on_close.call(());
                }
                Err(Error::ValidationError(invalid)) => errors.set(invalid),
                Err(e) => alerts.write().error(e.user_message()),
            }
        }
    };

    let field_error = move |field: &str| errors.read().for_field(field).map(str::to_string);
    let current = form();
    let expiry = current
        .expiry_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let heading = if id.is_some() { "Edit Coupon" } else { "Create Coupon" };

    rsx!(
        dialog { class: "modal modal-open",
            div { class: "modal-box flex flex-col gap-2",
                h3 { class: "font-bold text-lg", "{heading}" }
                TextField {
                    label: "Name",
                    value: current.name.clone(),
                    error: field_error("name"),
                    oninput: move |v| form.write().name = v,
                }
                TextField {
                    label: "Code",
                    value: current.code.clone(),
                    error: field_error("code"),
                    oninput: move |v| form.write().code = v,
                }
                TextField {
                    label: "Discount (%)",
                    input_type: "number",
                    value: current.discount.clone(),
                    error: field_error("discount"),
                    oninput: move |v| form.write().discount = v,
                }
                TextField {
                    label: "Expiry date",
                    input_type: "date",
                    value: expiry,
                    oninput: move |v: String| {
                        form.write().expiry_date = NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok();
                    },
                }
                TextField {
                    label: "Max uses (empty for unlimited)",
                    input_type: "number",
                    value: current.max_uses.clone(),
                    error: field_error("maxUses"),
                    oninput: move |v| form.write().max_uses = v,
                }
                CheckboxField {
                    label: "Special customer coupon",
                    checked: current.is_special,
                    onchange: move |checked| form.write().is_special = checked,
                }
                if current.is_special {
                    TextField {
                        label: "Customer name",
                        value: current.special_customer.clone(),
                        error: field_error("specialCustomer"),
                        oninput: move |v| form.write().special_customer = v,
                    }
                    TextField {
                        label: "Customer email",
                        input_type: "email",
                        value: current.special_email.clone(),
                        oninput: move |v| form.write().special_email = v,
                    }
                    TextField {
                        label: "Customer phone",
                        input_type: "tel",
                        value: current.special_phone.clone(),
                        oninput: move |v| form.write().special_phone = v,
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
