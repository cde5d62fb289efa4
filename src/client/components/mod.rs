pub mod delete_button;
pub mod field;
pub mod layout;
pub mod notice;
pub mod orders_table;
pub mod page;
pub mod pagination;
pub mod reference_select;
pub mod sidebar;
pub mod toasts;

pub use delete_button::DeleteButton;
pub use field::{CheckboxField, ImageField, TextField};
pub use layout::DashboardLayout;
pub use notice::{LiveIndicator, NewOrderBanner, PermissionWarning};
pub use orders_table::OrdersTable;
pub use page::Page;
pub use pagination::Pagination;
pub use reference_select::{use_reference_items, ReferenceSelect};
pub use sidebar::Sidebar;
pub use toasts::Toasts;
