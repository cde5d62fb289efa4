use crate::{data::client::ApiClient, error::ApiError, model::user::UserDto};

pub struct UserRepository<'a> {
    client: &'a ApiClient,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the signed-in operator.
    pub async fn me(&self) -> Result<UserDto, ApiError> {
        self.client.get("users/me", &[]).await
    }
}
