use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        router::Route,
        store::{AlertState, Services, UserState},
        util::browser,
    },
    config::Config,
    data::user::UserRepository,
    error::ApiError,
    notification::Alert,
};

#[component]
pub fn App() -> Element {
    let config = use_context::<Config>();
    let services = use_context_provider(|| Services::new(config));
    let mut alerts = use_context_provider(|| Signal::new(AlertState::default()));
    let mut user_store = use_context_provider(|| Signal::new(UserState::default()));

    // Load the operator's role once the identity provider has a session.
    let user_services = services.clone();
    use_future(move || {
        let services = user_services.clone();
        async move {
            let result = if browser::wait_for_session().await {
                UserRepository::new(&services.client).me().await
            } else {
                Err(ApiError::AuthenticationMissing)
            };
            let mut state = user_store.write();
            state.fetched = true;
            match result {
                Ok(user) => state.user = Some(user),
                Err(ApiError::AuthenticationMissing) => (),
                Err(e) => tracing::error!("Failed to load the signed-in user: {}", e),
            }
        }
    });

    // Render alerts raised by the notification channels.
    let alert_services = services.clone();
    use_future(move || {
        let services = alert_services.clone();
        async move {
            let Some(mut receiver) = services.take_alerts() else {
                return;
            };
            while let Some(alert) = receiver.recv().await {
                match alert {
                    Alert::Toast { title, body } => alerts.write().info(title, body),
                    Alert::Desktop { title, body } => {
                        browser::show_desktop_notification(&title, &body)
                    }
                    Alert::Sound(url) => browser::play_sound(&url),
                    Alert::Banner(event) => alerts.write().banner = Some(event),
                }
            }
        }
    });

    let hub = services.hub.clone();
    use_drop(move || hub.shutdown());

    rsx!(
        document::Stylesheet { href: "/tailwind.css" }
        Router::<Route> {}
    )
}

/// Rendered instead of [`App`] when the configuration could not be loaded.
#[component]
pub fn ConfigErrorApp() -> Element {
    rsx!(
        div { class: "min-h-screen flex items-center justify-center p-4",
            div { class: "alert alert-error max-w-xl",
                p {
                    "The dashboard is misconfigured. Check BLOSSOM_API_URL and the other BLOSSOM_* variables, then rebuild."
                }
            }
        }
    )
}
