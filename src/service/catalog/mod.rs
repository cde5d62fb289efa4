//! Catalog and reference-data maintenance.

#[cfg(test)]
mod tests;

use dioxus_logger::tracing;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    data::{client::ApiClient, resource::ResourceRepository},
    error::{ApiError, Error},
    form::FormEditor,
    model::api::ListResponse,
    query::{Fetched, KeyPattern, QueryCache, QueryKey},
    service::order::{query::ORDERS_NAMESPACE, ORDER_DETAIL_NAMESPACE},
};

/// Cache key of one `getAll` page of `resource`.
pub fn list_key(resource: &str, page: u32, page_size: u32) -> QueryKey {
    QueryKey::new(resource)
        .with("page", page)
        .with("pageSize", page_size)
}

/// Cache key of a single entity; shares the resource namespace with its lists.
pub fn detail_key(resource: &str, id: i64) -> QueryKey {
    QueryKey::new(resource).with("id", id)
}

/// Result of a delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Other records still reference the entity. The message is the server's
    /// and is shown in the force-delete confirmation.
    RequiresForce(String),
}

pub struct CatalogService<'a> {
    client: &'a ApiClient,
    cache: &'a QueryCache,
}

impl<'a> CatalogService<'a> {
    /// Creates a new instance of [`CatalogService`]
    pub fn new(client: &'a ApiClient, cache: &'a QueryCache) -> Self {
        Self { client, cache }
    }

    /// Fetches one page of a resource, served from the cache while fresh.
    pub async fn list<T>(
        &self,
        resource: &'static str,
        page: u32,
        page_size: u32,
    ) -> Result<Fetched<ListResponse<T>>, ApiError>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let repo = ResourceRepository::<T>::for_resource(self.client, resource);

        self.cache
            .fetch(&list_key(resource, page, page_size), || async move {
                repo.get_all(page, page_size).await
            })
            .await
    }

    /// Fetches one entity for an edit screen, served from the cache while fresh.
    pub async fn get<T>(&self, resource: &'static str, id: i64) -> Result<Fetched<T>, ApiError>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let repo = ResourceRepository::<T>::for_resource(self.client, resource);

        self.cache
            .fetch(&detail_key(resource, id), || async move {
                repo.get_by_id(id).await
            })
            .await
    }

    /// Validates `form` and creates or updates the entity.
    ///
    /// # Arguments
    /// - `form` - Editor holding the values to submit
    /// - `id` - `Some` to update an existing entity, `None` to create one
    ///
    /// # Returns
    /// - `Ok(Value)` - The server's response body; the resource namespace is invalidated
    /// - `Err(Error::ValidationError)` - Local validation failed; nothing was sent
    /// - `Err(Error::ApiError)` - The server rejected the submission; its message is kept verbatim
    pub async fn submit<F: FormEditor>(&self, form: &F, id: Option<i64>) -> Result<Value, Error> {
        let payload = form.build_payload()?;
        let resource = form.resource();
        let repo = ResourceRepository::<Value>::for_resource(self.client, resource);

        let response = match id {
            Some(id) => repo.update(id, payload).await,
            None => repo.create(payload).await,
        }
        .inspect_err(|e| tracing::warn!("Saving {} failed: {}", resource, e))?;

        match id {
            Some(id) => tracing::info!("Updated {} #{}", resource, id),
            None => tracing::info!("Created a new entry in {}", resource),
        }
        self.cache.invalidate(KeyPattern::namespace(resource));

        Ok(response)
    }

    /// Deletes an entity without forcing.
    ///
    /// # Returns
    /// - `Ok(DeleteOutcome::Deleted)` - Removed; the resource namespace is invalidated
    /// - `Ok(DeleteOutcome::RequiresForce)` - The server refused because of dependents
    /// - `Err(ApiError)` - Any other failure
    pub async fn delete(&self, resource: &'static str, id: i64) -> Result<DeleteOutcome, ApiError> {
        let repo = ResourceRepository::<Value>::for_resource(self.client, resource);

        match repo.delete(id, false).await {
            Ok(()) => {
                self.deleted(resource, id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(ApiError::Conflict(message)) => {
                tracing::info!("Deleting {} #{} requires force: {}", resource, id, message);
                Ok(DeleteOutcome::RequiresForce(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes an entity together with the references to it.
    ///
    /// Orders can embed the removed entity, so order lists and details are
    /// invalidated as well.
    pub async fn force_delete(&self, resource: &'static str, id: i64) -> Result<(), ApiError> {
        ResourceRepository::<Value>::for_resource(self.client, resource)
            .delete(id, true)
            .await?;
        self.deleted(resource, id);
        self.cache.invalidate(KeyPattern::namespace(ORDERS_NAMESPACE));
        self.cache.invalidate(KeyPattern::namespace(ORDER_DETAIL_NAMESPACE));

        Ok(())
    }

    fn deleted(&self, resource: &str, id: i64) {
        tracing::info!("Deleted {} #{}", resource, id);
        self.cache.invalidate(KeyPattern::namespace(resource));
    }
}
