use dioxus::prelude::*;

/// Content area of a dashboard screen, with its heading.
#[component]
pub fn Page(title: String, class: Option<&'static str>, actions: Option<Element>, children: Element) -> Element {
    let class: &str = if let Some(class) = class { class } else { "" };

    rsx!(
        document::Title { "{title} | Blossom Admin" }
        div {
            class: "p-6 flex flex-col gap-4 {class}",
            div { class: "flex items-center justify-between gap-2",
                h1 { class: "text-2xl font-bold",
                    "{title}"
                }
                if let Some(actions) = actions {
                    div { class: "flex gap-2",
                        {actions}
                    }
                }
            }
            {children}
        }
    )
}
