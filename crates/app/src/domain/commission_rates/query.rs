//! Commission rate listing queries.
//!
//! Turns raw, client-supplied listing parameters into a [`ListingQuery`].
//! Compilation never fails: every missing or malformed parameter falls back
//! to its default through a dedicated parse function.

use jiff::{Timestamp, civil::Date, tz::TimeZone};

use crate::domain::commission_rates::records::CommissionRateRecord;

/// Page size used when `limit` is missing or invalid.
pub const DEFAULT_LIMIT: u32 = 6;

/// Page used when `page` is missing or invalid.
pub const DEFAULT_PAGE: u32 = 1;

/// Raw listing parameters as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    /// Name substring to look for.
    pub search: Option<String>,

    /// Field to sort by, as exposed to clients (`name`, `createdAt`, ...).
    pub sort_by: Option<String>,

    /// `asc` or `desc`.
    pub order: Option<String>,

    /// Page size.
    pub limit: Option<String>,

    /// One-based page number.
    pub page: Option<String>,

    /// Inclusive lower bound on the creation time.
    pub created_at_from: Option<String>,

    /// Inclusive upper bound on the creation time.
    pub created_at_to: Option<String>,

    /// `active`, `deleted`, or anything else for both.
    pub status: Option<String>,
}

/// Sortable commission rate fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Identifier, which is also creation order.
    #[default]
    Id,

    /// Display name.
    Name,

    /// Fee amount.
    Fee,

    /// Description text.
    Description,

    /// Creation time.
    CreatedAt,

    /// Last modification time.
    UpdatedAt,

    /// Visibility flag; active rates sort first ascending.
    IsDeleted,
}

impl SortField {
    /// Name of the field as exposed to clients.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Fee => "fee",
            Self::Description => "description",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::IsDeleted => "isDeleted",
        }
    }

    /// Backing column name.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "uuid",
            Self::Name => "name",
            Self::Fee => "fee",
            Self::Description => "description",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::IsDeleted => "is_deleted",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,

    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Name of the direction as exposed to clients.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL keyword for the direction.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Visibility restriction applied to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Active and deleted records alike.
    #[default]
    Any,

    /// Only records that are not soft-deleted.
    Active,

    /// Only soft-deleted records.
    Deleted,
}

impl StatusFilter {
    /// Required value of the deleted flag, if any.
    #[must_use]
    pub fn is_deleted(self) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::Active => Some(false),
            Self::Deleted => Some(true),
        }
    }

    /// Whether a record passes this filter.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn matches(self, record: &CommissionRateRecord) -> bool {
        self.is_deleted()
            .is_none_or(|is_deleted| record.is_deleted == is_deleted)
    }
}

/// Inclusive bounds on the creation timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatedAtRange {
    /// Earliest creation time included.
    pub from: Option<Timestamp>,

    /// Latest creation time included.
    pub to: Option<Timestamp>,
}

#[cfg(test)]
impl CreatedAtRange {
    pub(crate) fn contains(&self, created_at: Timestamp) -> bool {
        self.from.is_none_or(|from| created_at >= from)
            && self.to.is_none_or(|to| created_at <= to)
    }
}

/// Normalized listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring of the name; empty matches everything.
    pub search: String,

    /// Primary sort key. Ties are broken by identifier.
    pub sort_by: SortField,

    /// Direction of the primary sort key.
    pub order: SortOrder,

    /// Always positive.
    pub limit: u32,
    /// Always positive. Reported back as-is even when out of range.
    pub page: u32,

    /// Parsed creation time bounds.
    pub created_at: CreatedAtRange,

    /// Visibility restriction.
    pub status: StatusFilter,

    /// Raw lower bound, echoed in the metadata.
    pub created_at_from: Option<String>,
    /// Raw upper bound, echoed in the metadata.
    pub created_at_to: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::compile(ListingParams::default())
    }
}

impl From<ListingParams> for ListingQuery {
    fn from(params: ListingParams) -> Self {
        Self::compile(params)
    }
}

impl ListingQuery {
    /// Compile raw parameters, defaulting anything missing or malformed.
    #[must_use]
    pub fn compile(params: ListingParams) -> Self {
        Self {
            search: parse_search(params.search.as_deref()),
            sort_by: parse_sort_by(params.sort_by.as_deref()),
            order: parse_order(params.order.as_deref()),
            limit: parse_limit(params.limit.as_deref()),
            page: parse_page(params.page.as_deref()),
            created_at: CreatedAtRange {
                from: parse_date_bound(params.created_at_from.as_deref()),
                to: parse_date_bound(params.created_at_to.as_deref()),
            },
            status: parse_status(params.status.as_deref()),
            created_at_from: params.created_at_from,
            created_at_to: params.created_at_to,
        }
    }

    /// `LIKE` pattern for the search term, or `None` when it matches everything.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        (!self.search.is_empty()).then(|| format!("%{}%", escape_like(&self.search)))
    }

    /// In-memory counterpart of the SQL filters.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn matches(&self, record: &CommissionRateRecord) -> bool {
        self.status.matches(record)
            && self.created_at.contains(record.created_at)
            && record
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    /// Resolve paging against the number of matching records.
    #[must_use]
    pub fn paging(&self, count: u64) -> Paging {
        Paging::resolve(count, self.limit, self.page)
    }

    /// Metadata echoed back alongside a page of results.
    #[must_use]
    pub fn meta(&self, page_count: u64) -> ListingMeta {
        ListingMeta {
            search: self.search.clone(),
            sort_by: self.sort_by,
            order: self.order,
            limit: self.limit,
            page_current: self.page,
            page_count,
            created_at_from: self.created_at_from.clone(),
            created_at_to: self.created_at_to.clone(),
        }
    }
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// `ceil(count / limit)`, zero when nothing matches.
    pub page_count: u64,
    /// Rows to skip. Requests past the last page are served the last page.
    pub offset: u64,
}

impl Paging {
    /// Compute the page count and the effective offset.
    #[must_use]
    pub fn resolve(count: u64, limit: u32, page: u32) -> Self {
        let limit = u64::from(limit.max(1));
        let page = u64::from(page.max(1));
        let page_count = count.div_ceil(limit);

        let effective_page = if page_count > 0 && page > page_count {
            page_count
        } else {
            page
        };

        Self {
            page_count,
            offset: limit.saturating_mul(effective_page - 1),
        }
    }

    /// Whether there is anything to fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

/// Paging metadata returned with a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingMeta {
    /// Normalized search term.
    pub search: String,

    /// Effective sort field.
    pub sort_by: SortField,

    /// Effective sort direction.
    pub order: SortOrder,

    /// Effective page size.
    pub limit: u32,

    /// The requested page, not the clamped one.
    pub page_current: u32,

    /// Number of pages available for the filters.
    pub page_count: u64,

    /// Lower creation bound exactly as the client sent it.
    pub created_at_from: Option<String>,

    /// Upper creation bound exactly as the client sent it.
    pub created_at_to: Option<String>,
}

/// One page of commission rates.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRatesPage {
    /// Records on the served page, at most `limit` of them.
    pub items: Vec<CommissionRateRecord>,

    /// Paging metadata for the request.
    pub meta: ListingMeta,
}

/// Search term; missing means match everything.
///
/// NUL characters are dropped, since `PostgreSQL` text cannot hold them.
#[must_use]
pub fn parse_search(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .chars()
        .filter(|c| *c != '\0')
        .collect()
}

/// Sort field; unknown names sort by id.
#[must_use]
pub fn parse_sort_by(raw: Option<&str>) -> SortField {
    match raw.map(str::trim) {
        Some("name") => SortField::Name,
        Some("fee") => SortField::Fee,
        Some("description") => SortField::Description,
        Some("createdAt") => SortField::CreatedAt,
        Some("updatedAt") => SortField::UpdatedAt,
        Some("isDeleted") => SortField::IsDeleted,
        _ => SortField::Id,
    }
}

/// Sort direction; only `asc` and `desc` are recognised.
#[must_use]
pub fn parse_order(raw: Option<&str>) -> SortOrder {
    match raw.map(str::trim) {
        Some("desc") => SortOrder::Desc,
        _ => SortOrder::Asc,
    }
}

/// Page size; falls back to [`DEFAULT_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> u32 {
    parse_positive(raw).unwrap_or(DEFAULT_LIMIT)
}

/// Page number; falls back to [`DEFAULT_PAGE`].
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    parse_positive(raw).unwrap_or(DEFAULT_PAGE)
}

/// Visibility filter; anything but `active`/`deleted` is unrestricted.
#[must_use]
pub fn parse_status(raw: Option<&str>) -> StatusFilter {
    match raw.map(str::trim) {
        Some("active") => StatusFilter::Active,
        Some("deleted") => StatusFilter::Deleted,
        _ => StatusFilter::Any,
    }
}

/// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC). Unparsable is no bound.
#[must_use]
pub fn parse_date_bound(raw: Option<&str>) -> Option<Timestamp> {
    let raw = raw?.trim();

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    raw.parse::<Date>()
        .and_then(|date| date.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .ok()
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
