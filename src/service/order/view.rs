//! State machine behind the all-orders and daily-orders tables.
//!
//! The view never performs I/O itself. Each transition that needs data
//! returns a [`LoadRequest`]; the caller executes it and hands the
//! [`LoadResult`] back to [`OrderListView::apply`]. Requests carry the view's
//! generation at the time they were issued, and results from an older
//! generation or arriving after [`OrderListView::unmount`] are dropped.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use dioxus_logger::tracing;

use crate::{
    config::Config,
    error::ApiError,
    model::order::{OrderDto, OrdersPageDto},
    query::{CacheEvent, Fetched},
    service::order::{
        filter,
        query::{CouponFilter, DateFilter, OrderQuery, SortDirection, SortField, StatusFilter},
        OrderService,
    },
};

/// Which orders screen the view backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListVariant {
    /// Admin screen: every filter and the coupon column.
    AllOrders,
    /// Order-handler screen: recent date presets only, no coupons.
    DailyOrders,
}

impl ListVariant {
    pub fn shows_coupons(&self) -> bool {
        matches!(self, Self::AllOrders)
    }

    pub fn date_choices(&self) -> &'static [&'static str] {
        match self {
            Self::AllOrders => &DateFilter::ADMIN_CHOICES,
            Self::DailyOrders => &DateFilter::DAILY_CHOICES,
        }
    }

    pub fn allows(&self, filter: &DateFilter) -> bool {
        self.date_choices().contains(&filter.as_str())
    }

    /// Only the admin screen offers the spreadsheet download.
    pub fn allows_export(&self) -> bool {
        matches!(self, Self::AllOrders)
    }
}

/// Local behavior switches, normally taken from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub page_size: u32,
    pub client_refilter: bool,
    pub utc_offset: FixedOffset,
    pub new_order_window: Duration,
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            client_refilter: config.client_refilter,
            utc_offset: config.utc_offset,
            new_order_window: config.new_order_window,
        }
    }
}

/// The rows of one loaded page.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersPage {
    pub orders: Vec<OrderDto>,
    pub total_pages: u32,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready(OrdersPage),
    Error(ApiError),
}

/// A load the caller must execute.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub generation: u64,
    pub query: OrderQuery,
}

impl LoadRequest {
    /// Fetches the page through the cache.
    pub async fn execute(self, service: &OrderService<'_>) -> LoadResult {
        let result = service.load_page(&self.query).await;
        LoadResult {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub generation: u64,
    pub result: Result<Fetched<OrdersPageDto>, ApiError>,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow<'a> {
    /// Position across all pages, starting at 1.
    pub number: u64,
    pub order: &'a OrderDto,
    pub is_new: bool,
}

pub struct OrderListView {
    variant: ListVariant,
    settings: ViewSettings,
    query: OrderQuery,
    state: ViewState,
    generation: u64,
    mounted: bool,
    total_pages: u32,
}

impl OrderListView {
    pub fn new(variant: ListVariant, settings: ViewSettings) -> Self {
        Self {
            variant,
            settings,
            query: OrderQuery::new(settings.page_size),
            state: ViewState::Idle,
            generation: 0,
            mounted: false,
            total_pages: 1,
        }
    }

    pub fn variant(&self) -> ListVariant {
        self.variant
    }

    pub fn query(&self) -> &OrderQuery {
        &self.query
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn can_go_back(&self) -> bool {
        self.query.page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.query.page < self.total_pages
    }

    /// Starts the first load. Must be called when the table appears.
    pub fn mount(&mut self) -> LoadRequest {
        self.mounted = true;
        self.reload()
    }

    /// Stops applying responses; anything in flight is discarded on arrival.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    /// Reloads the current page, e.g. from the error panel's retry button.
    pub fn retry(&mut self) -> LoadRequest {
        self.reload()
    }

    fn reload(&mut self) -> LoadRequest {
        self.generation += 1;
        self.state = ViewState::Loading;

        LoadRequest {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    fn update(&mut self, change: impl FnOnce(&mut OrderQuery)) -> Option<LoadRequest> {
        let before = self.query.clone();
        change(&mut self.query);

        if self.query == before {
            None
        } else {
            Some(self.reload())
        }
    }

    /// Moves to `page`, clamped to the known page range.
    pub fn set_page(&mut self, page: u32) -> Option<LoadRequest> {
        let page = page.clamp(1, self.total_pages.max(1));
        self.update(|q| q.page = page)
    }

    pub fn next_page(&mut self) -> Option<LoadRequest> {
        self.set_page(self.query.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<LoadRequest> {
        self.set_page(self.query.page.saturating_sub(1))
    }

    /// Selecting the current sort field flips the direction; a new field
    /// starts descending.
    pub fn toggle_sort(&mut self, field: SortField) -> Option<LoadRequest> {
        self.update(|q| {
            if q.sort_field == field {
                q.sort_direction = q.sort_direction.flipped();
            } else {
                q.sort_field = field;
                q.sort_direction = SortDirection::Desc;
            }
        })
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) -> Option<LoadRequest> {
        self.update(|q| {
            if q.status != status {
                q.status = status;
                q.page = 1;
            }
        })
    }

    /// Ignored on the daily screen, which has no coupon column.
    pub fn set_coupon_filter(&mut self, coupon: CouponFilter) -> Option<LoadRequest> {
        if !self.variant.shows_coupons() {
            return None;
        }
        self.update(|q| {
            if q.coupon != coupon {
                q.coupon = coupon;
                q.page = 1;
            }
        })
    }

    /// Presets the variant does not offer are ignored.
    pub fn set_date_filter(&mut self, date: DateFilter) -> Option<LoadRequest> {
        if !self.variant.allows(&date) {
            tracing::warn!("Date filter {} is not offered on this screen", date);
            return None;
        }
        self.update(|q| {
            if q.date != date {
                q.date = date;
                q.page = 1;
            }
        })
    }

    /// Reacts to a cache event.
    ///
    /// An invalidation covering the current key reloads a page that is shown
    /// or still loading, so an in-flight response that predates the
    /// invalidation is superseded.
    pub fn on_cache_event(&mut self, event: &CacheEvent) -> Option<LoadRequest> {
        if !self.mounted || !matches!(event, CacheEvent::Invalidated(_)) {
            return None;
        }
        if !event.affects(&self.query.cache_key()) {
            return None;
        }

        match self.state {
            ViewState::Ready(_) | ViewState::Loading => Some(self.reload()),
            ViewState::Idle | ViewState::Error(_) => None,
        }
    }

    /// Applies the outcome of a load.
    ///
    /// # Arguments
    /// - `result` - Outcome of [`LoadRequest::execute`]
    /// - `now` - Current instant, used by the optional local re-filter
    ///
    /// # Returns
    /// - `true` - The view changed state
    /// - `false` - The result was outdated or superseded and was dropped
    pub fn apply(&mut self, result: LoadResult, now: DateTime<Utc>) -> bool {
        if !self.mounted || result.generation != self.generation {
            tracing::debug!(
                "Dropping orders response for generation {} (current {})",
                result.generation,
                self.generation
            );
            return false;
        }

        match result.result {
            Ok(Fetched::Superseded) => false,
            Ok(Fetched::Cached(page)) | Ok(Fetched::Loaded(page)) => {
                self.show(page, now);
                true
            }
            Err(error) => {
                self.state = ViewState::Error(error);
                true
            }
        }
    }

    fn show(&mut self, page: OrdersPageDto, now: DateTime<Utc>) {
        let mut orders = page.items;

        if self.settings.client_refilter {
            orders = filter::refilter(orders, &self.query, now, self.settings.utc_offset);
        }
        orders.truncate(self.query.page_size as usize);

        if !filter::is_sorted(&orders, self.query.sort_field, self.query.sort_direction) {
            tracing::warn!(
                "Orders page {} is not sorted by {} {}; rendering as returned",
                self.query.page,
                self.query.sort_field.as_str(),
                self.query.sort_direction.as_str()
            );
        }

        self.total_pages = page.total_pages.max(1);
        self.state = ViewState::Ready(OrdersPage {
            orders,
            total_pages: self.total_pages,
            total_count: page.total_count,
        });
    }

    /// Orders of the current page as shown, empty until a page is ready.
    pub fn shown_orders(&self) -> &[OrderDto] {
        match &self.state {
            ViewState::Ready(page) => &page.orders,
            _ => &[],
        }
    }

    /// Rows of the current page with their numbering and "New" badge.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<OrderRow<'_>> {
        let ViewState::Ready(page) = &self.state else {
            return Vec::new();
        };
        let offset = (self.query.page as u64 - 1) * self.query.page_size as u64;

        page.orders
            .iter()
            .enumerate()
            .map(|(index, order)| OrderRow {
                number: offset + index as u64 + 1,
                order,
                is_new: order.is_new(now, self.settings.new_order_window),
            })
            .collect()
    }
}
