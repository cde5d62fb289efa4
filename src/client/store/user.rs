use crate::model::user::UserDto;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub user: Option<UserDto>,
    /// Set once `GET /users/me` has answered, successfully or not.
    pub fetched: bool,
}

impl UserState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserDto::is_admin)
    }
}
