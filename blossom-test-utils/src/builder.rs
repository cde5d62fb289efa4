//! Declarative mock API setup.
//!
//! This module provides the `TestBuilder` API for configuring the mock REST API before a test
//! runs. Endpoint methods can be chained together and are all registered during the final
//! `build()` call.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

use crate::{constant::TEST_AUTH_HEADER, error::TestError, setup::TestSetup};

/// Builder for declarative test initialization.
///
/// Every shortcut endpoint requires the test bearer token and verifies it was called exactly
/// the expected number of times when [`TestSetup::assert_mocks`] runs.
pub struct TestBuilder {
    mock_builders: Vec<Box<dyn FnOnce(&mut ServerGuard) -> Mock>>,

    orders_endpoints: Vec<(Value, usize)>,
    order_status_endpoints: Vec<(i64, usize)>,
    get_all_endpoints: Vec<(String, Value, usize)>,
    create_endpoints: Vec<(String, Value, usize)>,
    delete_endpoints: Vec<(String, i64, bool, u16, usize)>,
    subscribe_endpoints: Vec<usize>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no endpoints configured.
    pub fn new() -> Self {
        Self {
            mock_builders: Vec::new(),
            orders_endpoints: Vec::new(),
            order_status_endpoints: Vec::new(),
            get_all_endpoints: Vec::new(),
            create_endpoints: Vec::new(),
            delete_endpoints: Vec::new(),
            subscribe_endpoints: Vec::new(),
        }
    }

    /// Add a mock `GET /orders/all` endpoint returning `page` for any query string.
    ///
    /// # Arguments
    /// - `page` - Body to return, see [`crate::fixtures::order::orders_page_json`]
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_orders_endpoint(mut self, page: Value, expected_requests: usize) -> Self {
        self.orders_endpoints.push((page, expected_requests));
        self
    }

    /// Add a mock `PATCH /orders/{id}/status` endpoint that accepts any body.
    pub fn with_order_status_endpoint(mut self, order_id: i64, expected_requests: usize) -> Self {
        self.order_status_endpoints
            .push((order_id, expected_requests));
        self
    }

    /// Add a mock `GET /{resource}/getAll` endpoint returning `body` for any query string.
    pub fn with_get_all_endpoint(
        mut self,
        resource: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.get_all_endpoints
            .push((resource.into(), body, expected_requests));
        self
    }

    /// Add a mock `POST /{resource}/create` endpoint returning `body`.
    pub fn with_create_endpoint(
        mut self,
        resource: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.create_endpoints
            .push((resource.into(), body, expected_requests));
        self
    }

    /// Add a mock `DELETE /{resource}/delete/{id}?force={force}` endpoint.
    ///
    /// # Arguments
    /// - `resource` - Resource path segment, e.g. `categories`
    /// - `id` - Entity id in the path
    /// - `force` - Value of the `force` query parameter this mock matches
    /// - `status` - Status to respond with; `409` responds with a conflict message
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_delete_endpoint(
        mut self,
        resource: impl Into<String>,
        id: i64,
        force: bool,
        status: u16,
        expected_requests: usize,
    ) -> Self {
        self.delete_endpoints
            .push((resource.into(), id, force, status, expected_requests));
        self
    }

    /// Add a mock `POST /notifications/subscribe` endpoint.
    pub fn with_subscribe_endpoint(mut self, expected_requests: usize) -> Self {
        self.subscribe_endpoints.push(expected_requests);
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Allows complete customization of mock endpoint behavior by providing direct access
    /// to the mockito ServerGuard. Use this for endpoints not covered by helper methods.
    ///
    /// # Arguments
    /// - `setup` - Closure that receives the mock server and returns a configured Mock
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Start the mock server and register every configured endpoint.
    ///
    /// # Returns
    /// - `Ok(TestSetup)` - Mock server ready for use
    /// - `Err(TestError)` - The server could not be started
    pub async fn build(self) -> Result<TestSetup, TestError> {
        let mut setup = TestSetup::new().await?;

        for (page, expected_requests) in self.orders_endpoints {
            let mock = setup
                .server
                .mock("GET", "/api/orders/all")
                .match_query(Matcher::Any)
                .match_header("authorization", TEST_AUTH_HEADER)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(page.to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for (order_id, expected_requests) in self.order_status_endpoints {
            let mock = setup
                .server
                .mock("PATCH", format!("/api/orders/{}/status", order_id).as_str())
                .match_header("authorization", TEST_AUTH_HEADER)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "id": order_id }).to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for (resource, body, expected_requests) in self.get_all_endpoints {
            let mock = setup
                .server
                .mock("GET", format!("/api/{}/getAll", resource).as_str())
                .match_query(Matcher::Any)
                .match_header("authorization", TEST_AUTH_HEADER)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for (resource, body, expected_requests) in self.create_endpoints {
            let mock = setup
                .server
                .mock("POST", format!("/api/{}/create", resource).as_str())
                .match_header("authorization", TEST_AUTH_HEADER)
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for (resource, id, force, status, expected_requests) in self.delete_endpoints {
            let body = if status == 409 {
                json!({ "message": format!("{} {} is still referenced", resource, id) })
            } else {
                json!({ "message": "Deleted" })
            };
            let mock = setup
                .server
                .mock("DELETE", format!("/api/{}/delete/{}", resource, id).as_str())
                .match_query(Matcher::UrlEncoded("force".into(), force.to_string()))
                .match_header("authorization", TEST_AUTH_HEADER)
                .with_status(status as usize)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for expected_requests in self.subscribe_endpoints {
            let mock = setup
                .server
                .mock("POST", "/api/notifications/subscribe")
                .match_header("authorization", TEST_AUTH_HEADER)
                .match_body(Matcher::PartialJson(json!({ "topic": "new_orders" })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "success": true }).to_string())
                .expect(expected_requests)
                .create();
            setup.mocks.push(mock);
        }

        for builder in self.mock_builders {
            let mock = builder(&mut setup.server);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}
