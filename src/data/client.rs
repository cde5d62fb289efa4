//! HTTP client for the catalog & orders REST API.

use std::sync::Arc;

use dioxus_logger::tracing;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::{
    data::credential::CredentialProvider,
    error::ApiError,
    form::payload::Payload,
    model::api::ErrorDto,
};

/// Query string parameters, in the order they are appended to the URL.
pub type QueryParams = Vec<(&'static str, String)>;

/// Sends authenticated requests to the REST API and maps every failure to an
/// [`ApiError`].
///
/// Cloning is cheap; all clones share one connection pool and one credential
/// provider.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Creates a new instance of [`ApiClient`].
    ///
    /// # Arguments
    /// - `base_url` - API root, e.g. `https://shop.example.com/api`
    /// - `credentials` - Consulted for a bearer token before every request
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issues a `GET` and decodes the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, query, None).await
    }

    /// Issues a request with an optional body and decodes the JSON response.
    ///
    /// An empty response body decodes as JSON `null`, so `()` and `Option<T>`
    /// can be used for endpoints that return nothing.
    ///
    /// # Arguments
    /// - `method` - HTTP method
    /// - `path` - Path relative to the API root
    /// - `query` - Query string parameters
    /// - `payload` - JSON or multipart body
    ///
    /// # Returns
    /// - `Ok(T)` - 2xx response whose body decoded as `T`
    /// - `Err(ApiError::AuthenticationMissing)` - No token; nothing was sent
    /// - `Err(ApiError::AuthenticationExpired)` - HTTP 401 or 403
    /// - `Err(ApiError::NotFound)` / `Err(ApiError::Conflict)` - HTTP 404 / 409
    /// - `Err(ApiError::ServerRejected)` - Any other non-success status
    /// - `Err(ApiError::NetworkUnavailable)` - The request did not complete
    /// - `Err(ApiError::InvalidResponse)` - The body was not valid for `T`
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        payload: Option<Payload>,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, query, payload).await?;

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkUnavailable(e.to_string()))?;
        let text = if text.trim().is_empty() { "null" } else { &text };

        serde_json::from_str(text).map_err(|e| {
            tracing::warn!("Failed to decode response from {}: {}", path, e);
            ApiError::InvalidResponse(e.to_string())
        })
    }

    /// Issues a request and discards whatever body comes back.
    pub async fn send_discarding_body(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        payload: Option<Payload>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, query, payload).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        payload: Option<Payload>,
    ) -> Result<reqwest::Response, ApiError> {
        let token = self
            .credentials
            .bearer_token()
            .await
            .ok_or(ApiError::AuthenticationMissing)?;

        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match payload {
            Some(Payload::Json(body)) => request.json(&body),
            Some(Payload::Multipart(body)) => request.multipart(body.into_form()),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed to send: {}", method, url, e);
            ApiError::NetworkUnavailable(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = error_for_status(status.as_u16(), &body);
        tracing::warn!("{} {} returned {}: {}", method, url, status, error);

        Err(error)
    }
}

/// Maps a non-success status and its body to an [`ApiError`].
///
/// The server's reason is taken from a `{"message": ...}` or `{"error": ...}`
/// body when one is present.
pub fn error_for_status(status: u16, body: &str) -> ApiError {
    let reason = serde_json::from_str::<ErrorDto>(body)
        .ok()
        .and_then(|dto| dto.reason());

    match status {
        401 | 403 => ApiError::AuthenticationExpired,
        404 => ApiError::NotFound(reason.unwrap_or_default()),
        409 => ApiError::Conflict(reason.unwrap_or_default()),
        _ => ApiError::ServerRejected {
            status,
            message: reason,
        },
    }
}
