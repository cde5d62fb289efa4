use dioxus::prelude::*;

use crate::{client::store::Services, query::wait_for_refresh};

/// Restarts `resource` whenever entries of `namespace` are invalidated.
pub fn use_invalidation<T: 'static>(namespace: &'static str, mut resource: Resource<T>) {
    let services = use_context::<Services>();

    use_future(move || {
        let mut events = services.cache.subscribe();
        async move {
            while wait_for_refresh(&mut events, namespace).await {
                resource.restart();
            }
        }
    });
}
