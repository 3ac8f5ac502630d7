//! Query shaping shared by the handlers and every gateway backend.
//!
//! Raw query-string values are normalized here once, so the `PostgreSQL`
//! and in-memory stores both receive already-clamped limits and offsets.

/// Page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Number of rows returned by the "latest" listings (pharma, social).
pub const RECENT_LIMIT: i64 = 50;

/// Number of days in a district trend.
pub const TREND_WINDOW: i64 = 30;

/// Maximum number of alerts returned.
pub const ALERT_LIMIT: i64 = 50;

/// Risk score at or above which a summary counts as an alert.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.7;

/// A normalized `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Rows per page, in `1..=MAX_PAGE_SIZE`.
    pub limit: i64,
    /// Rows to skip.
    pub offset: i64,
}

impl PageRequest {
    /// Build a page from raw `limit` and 1-based `page` values.
    ///
    /// `limit` defaults to [`DEFAULT_PAGE_SIZE`] and is clamped to
    /// `1..=MAX_PAGE_SIZE`; `page` defaults to 1 and never goes below it.
    pub fn new(limit: Option<i64>, page: Option<i64>) -> Self {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        let offset = page.saturating_sub(1).saturating_mul(limit);
        Self { limit, offset }
    }

    /// The first page of the given size, clamped like [`PageRequest::new`].
    pub fn first(limit: i64) -> Self {
        Self::new(Some(limit), None)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Filter for the hospital record listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalFilter {
    /// Only records from this district.
    pub district: Option<String>,
    /// Page to return.
    pub page: PageRequest,
}

impl HospitalFilter {
    /// Build a filter, treating an empty district as no filter.
    pub fn new(district: Option<String>, page: PageRequest) -> Self {
        Self {
            district: district.filter(|d| !d.is_empty()),
            page,
        }
    }
}
