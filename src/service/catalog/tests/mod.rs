mod delete;

use std::sync::Arc;

use blossom_test_utils::prelude::*;

use crate::data::{ApiClient, StaticToken};

use super::*;

fn test_client(test: &TestSetup) -> ApiClient {
    ApiClient::new(test.api_url(), Arc::new(StaticToken(TEST_TOKEN.to_string())))
}
