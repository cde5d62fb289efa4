pub mod alert;
pub mod services;
pub mod user;

pub use alert::{AlertState, Toast};
pub use services::Services;
pub use user::UserState;
