//! Remote Data Client.
//!
//! [`client::ApiClient`] owns transport, authentication and error mapping;
//! the repositories below wrap it with one method per REST endpoint.

pub mod client;
pub mod credential;
pub mod notification;
pub mod order;
pub mod resource;
pub mod user;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use credential::{CredentialProvider, StaticToken};
pub use resource::{
    AddonRepository, CouponRepository, ProductRepository, ReferenceRepository, ResourceRepository,
};
