mod fetch;
mod tickets;

use super::*;

fn orders_key(page: u32) -> QueryKey {
    QueryKey::new("orders").with("page", page)
}
