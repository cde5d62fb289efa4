use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaDownload, FaSort, FaSortDown, FaSortUp};
use dioxus_free_icons::Icon;
use dioxus_logger::tracing;
use tokio::sync::broadcast::error::RecvError;

use crate::{
    client::{
        components::{LiveIndicator, NewOrderBanner, Pagination},
        router::Route,
        store::{AlertState, Services},
        util::browser,
    },
    error::Error,
    model::order::OrderStatus,
    service::order::{
        export::{self, EXPORT_FILE_NAME, XLSX_MIME},
        CouponFilter, DateFilter, ListVariant, LoadRequest, OrderListView, OrderService,
        SortDirection, SortField, StatusFilter, ViewSettings, ViewState,
    },
};

#[component]
fn SortHeader(
    label: &'static str,
    field: SortField,
    current: SortField,
    direction: SortDirection,
    on_sort: EventHandler<SortField>,
) -> Element {
    rsx!(
        th {
            button {
                class: "flex items-center gap-1",
                onclick: move |_| on_sort.call(field),
                "{label}"
                if field != current {
                    Icon { width: 12, height: 12, icon: FaSort }
                } else if direction == SortDirection::Asc {
                    Icon { width: 12, height: 12, icon: FaSortUp }
                } else {
                    Icon { width: 12, height: 12, icon: FaSortDown }
                }
            }
        }
    )
}

/// Paginated, filterable orders table kept current by cache invalidations.
#[component]
pub fn OrdersTable(variant: ListVariant) -> Element {
    let services = use_context::<Services>();
    let mut view = use_signal(|| OrderListView::new(variant, ViewSettings::from(&services.config)));
    let mut custom_start = use_signal(|| None::<NaiveDate>);
    let mut custom_end = use_signal(|| None::<NaiveDate>);

    let load_services = services.clone();
    let load = use_callback(move |request: LoadRequest| {
        let services = load_services.clone();
        spawn(async move {
            let service = OrderService::new(&services.client, &services.cache, services.config.utc_offset);
            let result = request.execute(&service).await;
            view.write().apply(result, Utc::now());
        });
    });
    let issue = move |request: Option<LoadRequest>| {
        if let Some(request) = request {
            load.call(request);
        }
    };

    let hub = services.hub.clone();
    use_hook(move || {
        hub.set_viewing_orders(true);
        let request = view.write().mount();
        load.call(request);
    });

    let cache = services.cache.clone();
    use_future(move || {
        let mut events = cache.subscribe();
        async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        let request = view.write().on_cache_event(&event);
                        if let Some(request) = request {
                            load.call(request);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("Orders table missed {} cache events; reloading", skipped);
                        let request = view.write().retry();
                        load.call(request);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    });

    let hub = services.hub.clone();
    use_drop(move || {
        hub.set_viewing_orders(false);
        if let Ok(mut view) = view.try_write() {
            view.unmount();
        }
    });

    let mut alerts = use_context::<Signal<AlertState>>();
    let export_offset = services.config.utc_offset;
    let download = move |_: MouseEvent| {
        let rows = export::export_rows(view.read().shown_orders(), export_offset);
        match export::orders_workbook(&rows) {
            Ok(bytes) => browser::download_file(EXPORT_FILE_NAME, XLSX_MIME, bytes),
            Err(e) => {
                tracing::error!("Orders export failed: {}", e);
                alerts.write().error(Error::from(e).user_message());
            }
        }
    };

    let current = view.read();
    let query = current.query().clone();
    let now = Utc::now();
    let rows = current.rows(now);
    let shows_coupons = variant.shows_coupons();
    let columns = if shows_coupons { 7 } else { 6 };

    rsx!(
        div { class: "flex flex-col gap-4",
            NewOrderBanner {}
            div { class: "flex flex-wrap items-end justify-between gap-4",
                div { class: "flex flex-wrap items-end gap-2",
                    label { class: "form-control",
                        span { class: "label-text", "Status" }
                        select {
                            class: "select select-bordered select-sm",
                            value: "{query.status.as_str()}",
                            onchange: move |evt| {
                                if let Some(status) = StatusFilter::parse(&evt.value()) {
                                    issue(view.write().set_status_filter(status));
                                }
                            },
                            option { value: "ALL", "All statuses" }
                            for status in OrderStatus::ALL {
                                option { value: "{status.as_str()}", "{status.label()}" }
                            }
                        }
                    }
                    label { class: "form-control",
                        span { class: "label-text", "Date" }
                        select {
                            class: "select select-bordered select-sm",
                            value: "{query.date.as_str()}",
                            onchange: move |evt| {
                                let value = evt.value();
                                if let Some(date) = DateFilter::parse_preset(&value) {
                                    issue(view.write().set_date_filter(date));
                                } else if value == "custom" {
                                    if let (Some(start), Some(end)) = (custom_start(), custom_end()) {
                                        issue(view.write().set_date_filter(DateFilter::custom(start, end)));
                                    }
                                }
                            },
                            for choice in variant.date_choices() {
                                option {
                                    value: "{choice}",
                                    {DateFilter::parse_preset(choice).map(|d| d.label()).unwrap_or("Custom range")}
                                }
                            }
                        }
                    }
                    if variant.allows(&DateFilter::All) {
                        label { class: "form-control",
                            span { class: "label-text", "From" }
                            input {
                                r#type: "date",
                                class: "input input-bordered input-sm",
                                onchange: move |evt| custom_start.set(evt.value().parse::<NaiveDate>().ok()),
                            }
                        }
                        label { class: "form-control",
                            span { class: "label-text", "To" }
                            input {
                                r#type: "date",
                                class: "input input-bordered input-sm",
                                onchange: move |evt| custom_end.set(evt.value().parse::<NaiveDate>().ok()),
                            }
                        }
                        button {
                            class: "btn btn-sm",
                            disabled: custom_start().is_none() || custom_end().is_none(),
                            onclick: move |_| {
                                if let (Some(start), Some(end)) = (custom_start(), custom_end()) {
                                    issue(view.write().set_date_filter(DateFilter::custom(start, end)));
                                }
                            },
                            "Apply range"
                        }
                    }
                    if shows_coupons {
                        label { class: "form-control",
                            span { class: "label-text", "Coupon" }
                            input {
                                class: "input input-bordered input-sm",
                                placeholder: "ALL",
                                onchange: move |evt| {
                                    issue(view.write().set_coupon_filter(CouponFilter::parse(evt.value().trim())));
                                },
                            }
                        }
                    }
                }
                div { class: "flex items-center gap-4",
                    LiveIndicator {}
                    if variant.allows_export() {
                        button {
                            class: "btn btn-outline btn-sm",
                            disabled: rows.is_empty(),
                            onclick: download,
                            Icon { width: 14, height: 14, icon: FaDownload }
                            "Download Excel"
                        }
                    }
                }
            }
            div { class: "overflow-x-auto",
                table { class: "table table-md",
                    thead {
                        tr {
                            th { "#" }
                            th { "Order" }
                            th { "Customer" }
                            SortHeader {
                                label: "Date",
                                field: SortField::CreatedAt,
                                current: query.sort_field,
                                direction: query.sort_direction,
                                on_sort: move |field| issue(view.write().toggle_sort(field)),
                            }
                            SortHeader {
                                label: "Total",
                                field: SortField::Total,
                                current: query.sort_field,
                                direction: query.sort_direction,
                                on_sort: move |field| issue(view.write().toggle_sort(field)),
                            }
                            if shows_coupons {
                                SortHeader {
                                    label: "Coupon",
                                    field: SortField::Coupon,
                                    current: query.sort_field,
                                    direction: query.sort_direction,
                                    on_sort: move |field| issue(view.write().toggle_sort(field)),
                                }
                            }
                            th { "Status" }
                        }
                    }
                    tbody {
                        {match current.state() {
                            ViewState::Idle | ViewState::Loading => rsx!(
                                for i in 0..query.page_size.min(5) {
                                    tr { key: "{i}",
                                        td { colspan: columns, div { class: "skeleton h-6 w-full" } }
                                    }
                                }
                            ),
                            ViewState::Error(error) => rsx!(
                                tr {
                                    td { colspan: columns,
                                        div { class: "alert alert-error flex justify-between",
                                            span { "{error.user_message()}" }
                                            button {
                                                class: "btn btn-sm",
                                                onclick: move |_| {
                                                    let request = view.write().retry();
                                                    load.call(request);
                                                },
                                                "Retry"
                                            }
                                        }
                                    }
                                }
                            ),
                            ViewState::Ready(_) if rows.is_empty() => rsx!(
                                tr { td { colspan: columns, class: "text-center opacity-60", "No orders found" } }
                            ),
                            ViewState::Ready(_) => rsx!(
                                for row in rows.iter() {
                                    tr { key: "{row.order.id}",
                                        td { "{row.number}" }
                                        td {
                                            div { class: "flex items-center gap-2",
                                                Link {
                                                    to: Route::OrderDetail { id: row.order.id },
                                                    class: "link",
                                                    "#{row.order.id}"
                                                }
                                                if row.is_new {
                                                    span { class: "badge badge-accent badge-sm", "New" }
                                                }
                                            }
                                        }
                                        td { "{row.order.customer_name}" }
                                        td {
                                            {row.order.created_at.with_timezone(&services.config.utc_offset).format("%Y-%m-%d %H:%M").to_string()}
                                        }
                                        td { {format!("{:.2}", row.order.total)} }
                                        if shows_coupons {
                                            td { {row.order.coupon_code().unwrap_or("-").to_string()} }
                                        }
                                        td {
                                            span {
                                                class: "badge text-white {row.order.status.badge_class()}",
                                                "{row.order.status.label()}"
                                            }
                                        }
                                    }
                                }
                            ),
                        }}
                    }
                }
            }
            Pagination {
                page: query.page,
                total_pages: current.total_pages(),
                on_change: move |page: u32| issue(view.write().set_page(page)),
            }
        }
    )
}
