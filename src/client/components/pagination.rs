use dioxus::prelude::*;

#[component]
pub fn Pagination(page: u32, total_pages: u32, on_change: EventHandler<u32>) -> Element {
    let total_pages = total_pages.max(1);

    rsx!(
        div { class: "flex items-center justify-end gap-2",
            button {
                class: "btn btn-sm",
                disabled: page <= 1,
                onclick: move |_| on_change.call(page.saturating_sub(1)),
                "Previous"
            }
            span { class: "text-sm", "Page {page} of {total_pages}" }
            button {
                class: "btn btn-sm",
                disabled: page >= total_pages,
                onclick: move |_| on_change.call(page + 1),
                "Next"
            }
        }
    )
}
