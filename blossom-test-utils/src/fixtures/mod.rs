//! JSON bodies shaped like the API's responses.

pub mod catalog;
pub mod order;
