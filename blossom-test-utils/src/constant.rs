//! Constants shared by the dashboard's tests.

/// Bearer token every mock endpoint expects.
///
/// Placeholder value, not a real credential.
pub static TEST_TOKEN: &str = "test-token";

/// Value of the `Authorization` header sent with [`TEST_TOKEN`].
pub static TEST_AUTH_HEADER: &str = "Bearer test-token";
