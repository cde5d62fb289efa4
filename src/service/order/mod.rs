//! Order List View and order operations.

pub mod export;
pub mod filter;
pub mod query;
pub mod status;
pub mod view;

#[cfg(test)]
mod tests;

use chrono::FixedOffset;

use crate::{
    data::{client::ApiClient, order::OrderRepository},
    error::ApiError,
    model::order::{OrderDto, OrdersPageDto},
    query::{Fetched, QueryCache, QueryKey},
};

pub use query::{CouponFilter, DateFilter, OrderQuery, SortDirection, SortField, StatusFilter};
pub use status::{OrderStatusService, StatusChange};
pub use view::{ListVariant, LoadRequest, LoadResult, OrderListView, OrderRow, ViewSettings, ViewState};

pub const ORDER_DETAIL_NAMESPACE: &str = "order";

/// Cache key of a single order's detail page.
pub fn order_detail_key(order_id: i64) -> QueryKey {
    QueryKey::new(ORDER_DETAIL_NAMESPACE).with("id", order_id)
}

/// Reads orders through the Query Cache.
pub struct OrderService<'a> {
    client: &'a ApiClient,
    cache: &'a QueryCache,
    utc_offset: FixedOffset,
}

impl<'a> OrderService<'a> {
    /// Creates a new instance of [`OrderService`].
    ///
    /// # Arguments
    /// - `client` - Remote Data Client
    /// - `cache` - Shared Query Cache
    /// - `utc_offset` - Shop time zone used to resolve custom date ranges
    pub fn new(client: &'a ApiClient, cache: &'a QueryCache, utc_offset: FixedOffset) -> Self {
        Self {
            client,
            cache,
            utc_offset,
        }
    }

    /// Fetches one page of orders, served from the cache while fresh.
    pub async fn load_page(&self, query: &OrderQuery) -> Result<Fetched<OrdersPageDto>, ApiError> {
        let params = query.to_params(self.utc_offset);
        let repo = OrderRepository::new(self.client);

        self.cache
            .fetch(&query.cache_key(), || async move { repo.list(&params).await })
            .await
    }

    /// Fetches one order's details, served from the cache while fresh.
    pub async fn get_order(&self, order_id: i64) -> Result<Fetched<OrderDto>, ApiError> {
        let repo = OrderRepository::new(self.client);

        self.cache
            .fetch(&order_detail_key(order_id), || async move {
                repo.get_by_id(order_id).await
            })
            .await
    }
}
