//! CRUD repositories for the catalog and reference-data resources.
//!
//! Every catalog resource exposes the same five endpoints under its own path
//! segment, so one generic repository serves products, addons, coupons and
//! each reference-item kind.

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    data::client::ApiClient,
    error::ApiError,
    form::payload::Payload,
    model::{
        api::ListResponse,
        catalog::{AddonDto, ProductDto},
        reference::{CouponDto, ItemKind, ReferenceItemDto},
    },
};

pub type ProductRepository<'a> = ResourceRepository<'a, ProductDto>;
pub type AddonRepository<'a> = ResourceRepository<'a, AddonDto>;
pub type ReferenceRepository<'a> = ResourceRepository<'a, ReferenceItemDto>;
pub type CouponRepository<'a> = ResourceRepository<'a, CouponDto>;

pub struct ResourceRepository<'a, T> {
    client: &'a ApiClient,
    resource: &'static str,
    _marker: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> ResourceRepository<'a, T> {
    /// Creates a repository for an arbitrary resource path segment.
    pub fn for_resource(client: &'a ApiClient, resource: &'static str) -> Self {
        Self {
            client,
            resource,
            _marker: PhantomData,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Fetches one page of the resource.
    ///
    /// # Arguments
    /// - `page` - 1-based page number
    /// - `page_size` - Items per page
    ///
    /// # Returns
    /// - `Ok(ListResponse<T>)` - Either a bare array or a paged object
    /// - `Err(ApiError)` - Request failed
    pub async fn get_all(&self, page: u32, page_size: u32) -> Result<ListResponse<T>, ApiError> {
        self.client
            .get(
                &format!("{}/getAll", self.resource),
                &[("page", page.to_string()), ("pageSize", page_size.to_string())],
            )
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<T, ApiError> {
        self.client
            .get(&format!("{}/getById/{}", self.resource, id), &[])
            .await
    }

    /// Creates an entity; the response body is returned undecoded since
    /// resources differ in what they echo back.
    pub async fn create(&self, payload: Payload) -> Result<Value, ApiError> {
        self.client
            .send(
                Method::POST,
                &format!("{}/create", self.resource),
                &[],
                Some(payload),
            )
            .await
    }

    pub async fn update(&self, id: i64, payload: Payload) -> Result<Value, ApiError> {
        self.client
            .send(
                Method::PUT,
                &format!("{}/update/{}", self.resource, id),
                &[],
                Some(payload),
            )
            .await
    }

    /// Deletes an entity.
    ///
    /// Without `force` the server answers `409 Conflict` when other records
    /// still reference the entity; with `force` it removes those references too.
    pub async fn delete(&self, id: i64, force: bool) -> Result<(), ApiError> {
        self.client
            .send_discarding_body(
                Method::DELETE,
                &format!("{}/delete/{}", self.resource, id),
                &[("force", force.to_string())],
                None,
            )
            .await
    }
}

impl<'a> ResourceRepository<'a, ProductDto> {
    /// Creates a new instance of [`ProductRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self::for_resource(client, "products")
    }
}

impl<'a> ResourceRepository<'a, AddonDto> {
    /// Creates a new instance of [`AddonRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self::for_resource(client, "addons")
    }
}

impl<'a> ResourceRepository<'a, CouponDto> {
    /// Creates a new instance of [`CouponRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self::for_resource(client, "coupons")
    }
}

impl<'a> ResourceRepository<'a, ReferenceItemDto> {
    /// Creates a [`ReferenceRepository`] for one kind of reference item.
    pub fn new(client: &'a ApiClient, kind: ItemKind) -> Self {
        Self::for_resource(client, kind.resource())
    }
}
