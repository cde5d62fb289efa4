mod notification;

use std::sync::Arc;

use blossom_test_utils::prelude::*;

use crate::data::{ApiClient, StaticToken};

/// Client pointed at the mock server, authenticated with the test token.
fn test_client(test: &TestSetup) -> ApiClient {
    ApiClient::new(test.api_url(), Arc::new(StaticToken(TEST_TOKEN.to_string())))
}
