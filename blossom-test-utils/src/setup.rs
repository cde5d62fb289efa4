use mockito::{Mock, Server, ServerGuard};

use crate::error::TestError;

/// A running mock API server and the mocks registered on it.
pub struct TestSetup {
    pub server: ServerGuard,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        Ok(TestSetup {
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL to hand to the client under test, e.g. `http://127.0.0.1:1234/api`.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.server.url())
    }

    /// Origin of the mock server, without the `/api` prefix.
    pub fn origin(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// Calls `assert()` on all mocks created by the TestBuilder to verify
    /// they were invoked the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
