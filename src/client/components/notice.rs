use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBell, FaCircleExclamation};
use dioxus_free_icons::Icon;

use crate::{
    client::store::{AlertState, Services},
    notification::{PushState, SocketState},
};

/// Shown while the browser blocks notifications.
#[component]
pub fn PermissionWarning(push_state: Signal<PushState>) -> Element {
    if *push_state.read() != PushState::Denied {
        return rsx!();
    }

    rsx!(
        div { class: "alert alert-warning",
            Icon { width: 20, height: 20, icon: FaCircleExclamation }
            span {
                "Notifications are blocked. Allow notifications for this site in your browser settings to be alerted of new orders."
            }
        }
    )
}

/// In-page alert raised by a push message while an orders page is open.
#[component]
pub fn NewOrderBanner() -> Element {
    let mut alerts = use_context::<Signal<AlertState>>();
    let Some(event) = alerts.read().banner.clone() else {
        return rsx!();
    };

    rsx!(
        div { class: "alert alert-info",
            Icon { width: 20, height: 20, icon: FaBell }
            div {
                p { class: "font-bold", "New Order Alert" }
                p { "{event.title}: {event.body}" }
            }
            button {
                class: "btn btn-sm",
                onclick: move |_| alerts.write().banner = None,
                "Dismiss"
            }
        }
    )
}

#[component]
pub fn LiveIndicator() -> Element {
    let services = use_context::<Services>();
    let mut state = use_signal(|| services.hub.socket_state());

    use_future(move || {
        let mut states = services.hub.watch_socket_state();
        async move {
            loop {
                state.set(*states.borrow_and_update());
                if states.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let connected = *state.read() == SocketState::Connected;

    rsx!(
        div { class: "flex items-center gap-2 text-sm",
            span {
                class: if connected { "badge badge-success badge-xs" } else { "badge badge-ghost badge-xs" },
            }
            if connected {
                span { "Real-time updates active" }
            } else {
                span { class: "opacity-60", "Connecting to real-time updates" }
            }
        }
    )
}
