use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaXmark;
use dioxus_free_icons::Icon;

use crate::client::store::AlertState;

#[component]
pub fn Toasts() -> Element {
    let mut alerts = use_context::<Signal<AlertState>>();
    let toasts = alerts.read().toasts.clone();

    rsx!(
        div { class: "toast toast-end z-50",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: if toast.is_error { "alert alert-error" } else { "alert alert-success" },
                    div {
                        p { class: "font-bold", "{toast.title}" }
                        p { "{toast.body}" }
                    }
                    button {
                        class: "btn btn-ghost btn-xs",
                        onclick: move |_| alerts.write().dismiss(toast.id),
                        Icon { width: 12, height: 12, icon: FaXmark }
                    }
                }
            }
        }
    )
}
