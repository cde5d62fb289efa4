use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaTrash;
use dioxus_free_icons::Icon;

use crate::{
    client::store::{AlertState, Services},
    service::{CatalogService, DeleteOutcome},
};

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Idle,
    Confirm,
    /// The server reported dependents; its message is shown before forcing.
    Force(String),
    Working,
}

/// Delete with confirmation, offering a forced delete when other records
/// still reference the entity.
#[component]
pub fn DeleteButton(resource: &'static str, id: i64, name: String) -> Element {
    let services = use_context::<Services>();
    let mut alerts = use_context::<Signal<AlertState>>();
    let mut step = use_signal(|| Step::Idle);

    let delete_services = services.clone();
    let delete = move |force: bool| {
        let services = delete_services.clone();
        step.set(Step::Working);
        spawn(async move {
            let catalog = CatalogService::new(&services.client, &services.cache);
            let result = if force {
                catalog.force_delete(resource, id).await.map(|()| DeleteOutcome::Deleted)
            } else {
                catalog.delete(resource, id).await
            };

            match result {
                Ok(DeleteOutcome::Deleted) => {
                    step.set(Step::Idle);
                    alerts.write().info("Deleted", "The item was deleted.");
                }
                Ok(DeleteOutcome::RequiresForce(message)) => step.set(Step::Force(message)),
                Err(e) => {
                    step.set(Step::Idle);
                    alerts.write().error(e.user_message());
                }
            }
        });
    };
    let mut confirm = delete.clone();
    let mut force = delete;

    let current = step();

    rsx!(
        button {
            class: "btn btn-ghost btn-sm text-error",
            disabled: current == Step::Working,
            onclick: move |_| step.set(Step::Confirm),
            Icon { width: 14, height: 14, icon: FaTrash }
        }
        {match current.clone() {
            Step::Confirm => rsx!(
                dialog { class: "modal modal-open",
                    div { class: "modal-box",
                        h3 { class: "font-bold text-lg", "Delete {name}?" }
                        p { class: "py-2", "This cannot be undone." }
                        div { class: "modal-action",
                            button { class: "btn", onclick: move |_| step.set(Step::Idle), "Cancel" }
                            button { class: "btn btn-error", onclick: move |_| confirm(false), "Delete" }
                        }
                    }
                }
            ),
            Step::Force(message) => rsx!(
                dialog { class: "modal modal-open",
                    div { class: "modal-box",
                        h3 { class: "font-bold text-lg", "{name} is still in use" }
                        p { class: "py-2", "{message}" }
                        p { "Delete it anyway? References to it will be removed as well." }
                        div { class: "modal-action",
                            button { class: "btn", onclick: move |_| step.set(Step::Idle), "Cancel" }
                            button { class: "btn btn-error", onclick: move |_| force(true), "Delete anyway" }
                        }
                    }
                }
            ),
            Step::Idle | Step::Working => rsx!(),
        }}
    )
}
