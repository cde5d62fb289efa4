use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaArrowLeft;
use dioxus_free_icons::Icon;

use crate::{
    client::{
        components::{OrdersTable, Page},
        router::Route,
        store::{AlertState, Services, UserState},
        util::use_invalidation,
    },
    error::{Error, ValidationErrors},
    model::order::{OrderDto, OrderHandler, OrderItemVariationDto, OrderStatus},
    service::{
        order::{ListVariant, ORDER_DETAIL_NAMESPACE},
        OrderService, OrderStatusService,
    },
};

#[component]
pub fn AllOrders() -> Element {
    rsx!(
        Page { title: "All Orders",
            OrdersTable { variant: ListVariant::AllOrders }
        }
    )
}

#[component]
pub fn DailyOrders() -> Element {
    rsx!(
        Page { title: "Daily Orders",
            OrdersTable { variant: ListVariant::DailyOrders }
        }
    )
}

fn variation_summary(variation: &OrderItemVariationDto) -> String {
    [
        ("Size", &variation.size),
        ("Infinity", &variation.infinity_color),
        ("Box", &variation.box_color),
        ("Wrapping", &variation.wrapping_color),
    ]
    .into_iter()
    .filter_map(|(label, name)| name.as_ref().map(|n| format!("{}: {}", label, n.name_en)))
    .collect::<Vec<_>>()
    .join(" / ")
}

#[component]
pub fn OrderDetail(id: i64) -> Element {
    let services = use_context::<Services>();
    let user = use_context::<Signal<UserState>>();
    let back = if user.read().is_admin() {
        Route::AllOrders {}
    } else {
        Route::DailyOrders {}
    };

    let load_services = services.clone();
    let order = use_resource(move || {
        let services = load_services.clone();
        async move {
            OrderService::new(&services.client, &services.cache, services.config.utc_offset)
                .get_order(id)
                .await
        }
    });
    use_invalidation(ORDER_DETAIL_NAMESPACE, order);

    let hub = services.hub.clone();
    use_hook(move || hub.set_viewing_orders(true));
    let hub = services.hub.clone();
    use_drop(move || hub.set_viewing_orders(false));

    rsx!(
        Page {
            title: "Order #{id}",
            actions: rsx!(
                Link { to: back, class: "btn btn-ghost btn-sm",
                    Icon { width: 14, height: 14, icon: FaArrowLeft }
                    "Orders"
                }
            ),
            {match &*order.read_unchecked() {
                None => rsx!( div { class: "skeleton h-64 w-full" } ),
                Some(Err(e)) => rsx!( div { class: "alert alert-error", "{e.user_message()}" } ),
                Some(Ok(fetched)) => match fetched.clone().into_value() {
                    None => rsx!( div { class: "alert", "Order #{id} was not found." } ),
                    Some(order) => rsx!( OrderSummary { order } ),
                },
            }}
        }
    )
}

#[component]
fn OrderSummary(order: OrderDto) -> Element {
    let services = use_context::<Services>();
    let offset = services.config.utc_offset;
    let address = &order.shipping_address;
    let created = order
        .created_at
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    rsx!(
        div { class: "grid grid-cols-1 lg:grid-cols-3 gap-4",
            div { class: "card bg-base-200 lg:col-span-2",
                div { class: "card-body",
                    div { class: "flex items-center gap-2",
                        span { class: "badge text-white {order.status.badge_class()}", "{order.status.label()}" }
                        span { class: "text-sm opacity-70", "Placed {created}" }
                        if let Some(handler) = order.processed_by {
                            span { class: "text-sm opacity-70", "Handled by {handler}" }
                        }
                    }
                    table { class: "table",
                        thead {
                            tr {
                                th { "Item" }
                                th { "Quantity" }
                                th { "Price" }
                            }
                        }
                        tbody {
                            for item in order.items.iter() {
                                tr { key: "{item.id}",
                                    td {
                                        p { "{item.product.name_en}" }
                                        p { class: "text-xs opacity-60", {variation_summary(&item.product_variation)} }
                                        for addon in item.addons.iter() {
                                            p { key: "{addon.id}", class: "text-xs",
                                                "+ {addon.addon.name_en} x{addon.quantity} ({addon.price:.2})"
                                            }
                                        }
                                    }
                                    td { "{item.quantity}" }
                                    td { "{item.price:.2}" }
                                }
                            }
                        }
                    }
                    div { class: "flex flex-col items-end gap-1",
                        if let Some(subtotal) = order.subtotal {
                            p { "Subtotal: {subtotal:.2}" }
                        }
                        if let Some(shipping) = order.shipping_cost {
                            p { "Shipping: {shipping:.2}" }
                        }
                        if let Some(tax) = order.tax_info {
                            p { "Tax: {tax:.2}" }
                        }
                        if let Some(code) = order.coupon_code() {
                            p { "Coupon: {code}" }
                        }
                        p { class: "font-bold", "Total: {order.total:.2}" }
                    }
                }
            }
            div { class: "flex flex-col gap-4",
                div { class: "card bg-base-200",
                    div { class: "card-body",
                        h2 { class: "card-title", "Customer" }
                        p { "{order.customer_name}" }
                        p { class: "text-sm", "{order.customer_email}" }
                        p { class: "text-sm", "{order.customer_phone}" }
                        h3 { class: "font-semibold mt-2", "Shipping address" }
                        p { class: "text-sm", "{address.address_line1}" }
                        p { class: "text-sm", "{address.state}, {address.country} {address.postal_code}" }
                        p { class: "text-sm", "{address.phone}" }
                        if let Some(message) = &order.card_message {
                            h3 { class: "font-semibold mt-2", "Card message" }
                            p { class: "text-sm italic", "{message}" }
                        }
                    }
                }
                StatusForm {
                    order_id: order.id,
                    status: order.status,
                    processed_by: order.processed_by,
                }
            }
        }
    )
}

#[component]
fn StatusForm(order_id: i64, status: OrderStatus, processed_by: Option<OrderHandler>) -> Element {
    let services = use_context::<Services>();
    let mut alerts = use_context::<Signal<AlertState>>();
    let mut selected_status = use_signal(|| status);
    let mut selected_handler = use_signal(|| processed_by);
    let mut errors = use_signal(ValidationErrors::new);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let services = services.clone();
        async move {
            saving.set(true);
            let result = OrderStatusService::new(&services.client, &services.cache)
                .change_status(order_id, selected_status(), selected_handler())
                .await;
            saving.set(false);

            match result {
                Ok(()) => {
                    errors.set(ValidationErrors::new());
                    alerts.write().info(
                        "Status updated",
                        format!("Order #{} is now {}.", order_id, selected_status().label()),
                    );
                }
                Err(Error::ValidationError(invalid)) => errors.set(invalid),
                Err(e) => alerts.write().error(e.user_message()),
            }
        }
    };

    let handler_error = errors.read().for_field("processedBy").map(str::to_string);
    let handler_value = selected_handler().map(|h| h.as_str()).unwrap_or("");

    rsx!(
        div { class: "card bg-base-200",
            div { class: "card-body gap-2",
                h2 { class: "card-title", "Update status" }
                select {
                    class: "select select-bordered",
                    value: "{selected_status().as_str()}",
                    onchange: move |evt| {
                        if let Ok(next) = evt.value().parse::<OrderStatus>() {
                            selected_status.set(next);
                        }
                    },
                    for option_status in OrderStatus::ALL {
                        option { value: "{option_status.as_str()}", "{option_status.label()}" }
                    }
                }
                if selected_status().requires_handler() {
                    select {
                        class: "select select-bordered",
                        value: "{handler_value}",
                        onchange: move |evt| selected_handler.set(evt.value().parse::<OrderHandler>().ok()),
                        option { value: "", "Select a handler" }
                        for handler in OrderHandler::ALL {
                            option { value: "{handler.as_str()}", "{handler}" }
                        }
                    }
                }
                if let Some(error) = handler_error {
                    span { class: "text-error text-sm", "{error}" }
                }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: submit,
                    if saving() { "Updating..." } else { "Update" }
                }
            }
        }
    )
}
