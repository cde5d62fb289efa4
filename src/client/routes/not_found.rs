use dioxus::prelude::*;

use crate::client::{components::Page, router::Route};

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx!(
        Page { title: "Not Found",
            div { class: "flex flex-col items-center gap-4 py-16",
                p { class: "text-2xl font-bold", "404" }
                p { "Nothing lives at /{path}." }
                Link { to: Route::Home {}, class: "btn btn-primary", "Back to the dashboard" }
            }
        }
    )
}
