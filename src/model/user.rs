use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    OrderHandler,
    #[serde(other)]
    Other,
}

/// The signed-in operator, as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
}

impl UserDto {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Order handlers only see the daily orders screen.
    pub fn can_handle_orders(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::OrderHandler)
    }
}
