//! Paging, sorting and filter parameters of the order tables.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::{
    data::client::QueryParams,
    model::order::OrderStatus,
    query::QueryKey,
};

pub const ORDERS_NAMESPACE: &str = "orders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    CreatedAt,
    Total,
    Coupon,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Total => "total",
            Self::Coupon => "coupon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == "ALL" {
            return Some(Self::All);
        }
        value.parse::<OrderStatus>().ok().map(Self::Only)
    }

    pub fn accepts(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CouponFilter {
    All,
    Code(String),
}

impl CouponFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "ALL",
            Self::Code(code) => code,
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == "ALL" {
            Self::All
        } else {
            Self::Code(value.to_string())
        }
    }
}

/// Creation-date window of the order tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFilter {
    Today,
    Yesterday,
    /// The last seven days, counted back from now.
    Week,
    Month,
    LastMonth,
    /// Calendar days `start` through `end`, both inclusive.
    Custom { start: NaiveDate, end: NaiveDate },
    All,
}

/// A resolved `[start, end)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl DateFilter {
    /// Choices offered on the all-orders screen.
    pub const ADMIN_CHOICES: [&'static str; 7] =
        ["today", "yesterday", "week", "month", "lastMonth", "custom", "all"];
    /// Choices offered on the daily-orders screen.
    pub const DAILY_CHOICES: [&'static str; 3] = ["today", "yesterday", "week"];

    /// Builds a custom range; the bounds are swapped if given in reverse.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self::Custom { start, end }
        } else {
            Self::Custom {
                start: end,
                end: start,
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Week => "week",
            Self::Month => "month",
            Self::LastMonth => "lastMonth",
            Self::Custom { .. } => "custom",
            Self::All => "all",
        }
    }

    /// Parses a preset name. `custom` needs dates and is built with [`DateFilter::custom`].
    pub fn parse_preset(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "lastMonth" => Some(Self::LastMonth),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Week => "Last 7 days",
            Self::Month => "This month",
            Self::LastMonth => "Last month",
            Self::Custom { .. } => "Custom range",
            Self::All => "All time",
        }
    }

    /// Resolves the filter to an interval in the shop's time zone.
    ///
    /// # Arguments
    /// - `now` - Current instant
    /// - `offset` - Shop time zone used for day and month boundaries
    ///
    /// # Returns
    /// - `Some(DateRange)` - Orders created inside the range pass the filter
    /// - `None` - `All`; every order passes
    pub fn range(&self, now: DateTime<Utc>, offset: FixedOffset) -> Option<DateRange> {
        let today = now.with_timezone(&offset).date_naive();
        let midnight = |date: NaiveDate| local_midnight(date, offset);
        let next_day = |date: NaiveDate| date.succ_opt().unwrap_or(date);

        match self {
            Self::All => None,
            Self::Today => Some(DateRange {
                start: midnight(today),
                end: midnight(next_day(today)),
            }),
            Self::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                Some(DateRange {
                    start: midnight(yesterday),
                    end: midnight(today),
                })
            }
            Self::Week => Some(DateRange {
                start: now - Duration::days(7),
                end: midnight(next_day(today)),
            }),
            Self::Month => {
                let first = first_of_month(today.year(), today.month());
                let (year, month) = next_month(today.year(), today.month());
                Some(DateRange {
                    start: midnight(first),
                    end: midnight(first_of_month(year, month)),
                })
            }
            Self::LastMonth => {
                let (year, month) = previous_month(today.year(), today.month());
                Some(DateRange {
                    start: midnight(first_of_month(year, month)),
                    end: midnight(first_of_month(today.year(), today.month())),
                })
            }
            Self::Custom { start, end } => Some(DateRange {
                start: midnight(*start),
                end: midnight(next_day(*end)),
            }),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Everything that determines which orders one table page shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderQuery {
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub status: StatusFilter,
    pub coupon: CouponFilter,
    pub date: DateFilter,
}

impl OrderQuery {
    /// Newest orders of today, first page.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sort_field: SortField::CreatedAt,
            sort_direction: SortDirection::Desc,
            status: StatusFilter::All,
            coupon: CouponFilter::All,
            date: DateFilter::Today,
        }
    }

    /// Cache key covering every parameter, so each combination is cached separately.
    pub fn cache_key(&self) -> QueryKey {
        let mut key = QueryKey::new(ORDERS_NAMESPACE)
            .with("page", self.page)
            .with("pageSize", self.page_size)
            .with("sortField", self.sort_field.as_str())
            .with("sortDirection", self.sort_direction.as_str())
            .with("filterStatus", self.status.as_str())
            .with("selectedCoupon", self.coupon.as_str())
            .with("dateFilter", self.date.as_str());

        if let DateFilter::Custom { start, end } = self.date {
            key = key
                .with("customStartDate", start)
                .with("customEndDate", end);
        }

        key
    }

    /// Query string of `GET /orders/all`.
    ///
    /// Custom bounds are sent as RFC 3339 instants of the resolved range, the
    /// end being the exclusive midnight after the last selected day.
    pub fn to_params(&self, offset: FixedOffset) -> QueryParams {
        let mut params: QueryParams = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sortField", self.sort_field.as_str().to_string()),
            ("sortDirection", self.sort_direction.as_str().to_string()),
            ("filterStatus", self.status.as_str().to_string()),
            ("selectedCoupon", self.coupon.as_str().to_string()),
            ("dateFilter", self.date.as_str().to_string()),
        ];

        if let DateFilter::Custom { .. } = self.date {
            if let Some(range) = self.date.range(Utc::now(), offset) {
                params.push(("customStartDate", range.start.to_rfc3339()));
                params.push(("customEndDate", range.end.to_rfc3339()));
            }
        }

        params
    }
}
