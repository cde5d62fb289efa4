use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus::core::spawn_forever;
use dioxus_logger::tracing;

use crate::{
    client::{
        components::{PermissionWarning, Sidebar, Toasts},
        router::Route,
        store::Services,
        util::browser,
    },
    notification::{Permission, PushState},
};

/// Pause before the order socket is reopened after it ends.
#[cfg(feature = "web")]
const SOCKET_RECONNECT_MILLIS: u32 = 1_000;

/// Asks for notification permission, registers the push token and listens
/// for foreground messages.
async fn start_push(services: Services, mut push_state: Signal<PushState>) {
    let hub = services.hub.clone();
    if !hub.begin_permission_request() {
        push_state.set(hub.push_state());
        return;
    }
    push_state.set(hub.push_state());

    let mut permission = browser::notification_permission().await;
    if permission == Permission::Default {
        permission = browser::request_notification_permission().await;
    }
    hub.permission_resolved(permission);
    push_state.set(hub.push_state());

    if hub.push_state() != PushState::Granted {
        return;
    }
    if !browser::wait_for_session().await {
        tracing::warn!("Not signed in; skipping push registration");
        return;
    }
    if let Some(token) = browser::push_token(services.config.firebase_vapid_key.as_deref()).await {
        hub.register_push_token(&token).await;
    }
    browser::listen_push_messages(hub).await;
}

#[cfg(feature = "web")]
async fn start_socket(services: Services) {
    use crate::client::util::socket::run_order_socket;

    if !browser::wait_for_session().await {
        tracing::warn!("Not signed in; order socket not opened");
        return;
    }
    let hub = services.hub.clone();
    hub.keep_socket_open(
        browser::session_token,
        |connection| run_order_socket(services.hub.clone(), connection),
        || browser::sleep(SOCKET_RECONNECT_MILLIS),
    )
    .await;
}

#[component]
pub fn DashboardLayout() -> Element {
    let services = use_context::<Services>();
    let push_state = use_signal(|| services.hub.push_state());

    let push_services = services.clone();
    use_hook(move || {
        spawn(start_push(push_services, push_state));
    });

    // The socket outlives this layout and reconnects until the hub shuts down.
    #[cfg(feature = "web")]
    {
        let socket_services = services.clone();
        use_hook(move || {
            spawn_forever(start_socket(socket_services));
        });
    }

    rsx!(
        div { class: "flex min-h-screen bg-base-100",
            Sidebar {}
            main { class: "flex-1 overflow-y-auto",
                div { class: "px-6 pt-4",
                    PermissionWarning { push_state }
                }
                Outlet::<Route> {}
            }
        }
        Toasts {}
    )
}
