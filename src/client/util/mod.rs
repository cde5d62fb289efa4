pub mod browser;
pub mod invalidation;
#[cfg(feature = "web")]
pub mod socket;
pub mod upload;

pub use invalidation::use_invalidation;
