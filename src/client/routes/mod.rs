pub mod addons;
pub mod coupons;
pub mod home;
pub mod items;
pub mod not_found;
pub mod orders;
pub mod products;

pub use addons::{AddonEditor, Addons, CreateAddon, EditAddon};
pub use coupons::Coupons;
pub use home::Home;
pub use items::ReferenceItems;
pub use not_found::NotFound;
pub use orders::{AllOrders, DailyOrders, OrderDetail};
pub use products::{CreateProduct, EditProduct, ProductEditor, Products};
