//! Operations the dashboard screens drive, built on the Remote Data Client
//! and the Query Cache.

pub mod catalog;
pub mod order;

pub use catalog::{CatalogService, DeleteOutcome};
pub use order::{OrderListView, OrderService, OrderStatusService};
