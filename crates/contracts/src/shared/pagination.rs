//! Paginated list contract shared by every list page.
//!
//! Backends disagree on how they spell pagination (`page` vs `current_page`,
//! `limit` vs `per_page`, `totalPages` vs `last_page`). All of that is folded
//! into [`PaginationEnvelope`] here, so pages only ever see [`ListResult`].

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

const PAGE_KEYS: &[&str] = &["page", "current_page", "currentPage"];
const PAGE_SIZE_KEYS: &[&str] = &["limit", "per_page", "page_size", "pageSize"];
const TOTAL_PAGES_KEYS: &[&str] = &["totalPages", "total_pages", "last_page", "lastPage"];
const TOTAL_RECORDS_KEYS: &[&str] = &["total", "total_count", "totalCount", "count"];

// ============================================================================
// Request side
// ============================================================================

/// Page being asked for. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Single column filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Null,
}

impl FilterValue {
    /// Query-string form; `None` for values that must not be sent.
    pub fn as_param(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) if s.trim().is_empty() => None,
            FilterValue::Text(s) => Some(s.trim().to_string()),
            FilterValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::Null => None,
        }
    }
}

pub type Filters = BTreeMap<String, FilterValue>;

/// Which endpoint flavour feeds the table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryKind {
    #[default]
    List,
    Search(String),
    Filter(Filters),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    pub request: PageRequest,
    pub kind: QueryKind,
}

impl ListQuery {
    pub fn list(request: PageRequest) -> Self {
        Self {
            request,
            kind: QueryKind::List,
        }
    }

    /// Blank search text falls back to a plain list call.
    pub fn search(request: PageRequest, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::list(request);
        }
        Self {
            request,
            kind: QueryKind::Search(text.trim().to_string()),
        }
    }

    /// Filters whose values are all blank fall back to a plain list call.
    pub fn filter(request: PageRequest, filters: Filters) -> Self {
        if filters.values().all(|v| v.as_param().is_none()) {
            return Self::list(request);
        }
        Self {
            request,
            kind: QueryKind::Filter(filters),
        }
    }

    /// Text of the running search; `None` for list and filter queries.
    pub fn search_text(&self) -> Option<&str> {
        match &self.kind {
            QueryKind::Search(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            request: PageRequest::new(page, self.request.page_size),
            kind: self.kind.clone(),
        }
    }

    /// Changing the page size always goes back to page 1.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            request: PageRequest::first(page_size),
            kind: self.kind.clone(),
        }
    }

    /// Query parameters in a stable order: `page`, `limit`, then search/filter keys.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.request.page.to_string()),
            ("limit".to_string(), self.request.page_size.to_string()),
        ];
        match &self.kind {
            QueryKind::List => {}
            QueryKind::Search(text) => pairs.push(("search".to_string(), text.clone())),
            QueryKind::Filter(filters) => {
                for (key, value) in filters {
                    if let Some(param) = value.as_param() {
                        pairs.push((key.clone(), param));
                    }
                }
            }
        }
        pairs
    }
}

// ============================================================================
// Response side
// ============================================================================

/// Pagination block exactly as some backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawPagination {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub total_pages: Option<u64>,
    pub total_records: Option<u64>,
}

impl RawPagination {
    /// Reads whichever spelling is present. Numbers may be JSON numbers or numeric strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let pick = |keys: &[&str]| keys.iter().find_map(|k| obj.get(*k).and_then(as_u64));
        let raw = Self {
            page: pick(PAGE_KEYS),
            page_size: pick(PAGE_SIZE_KEYS),
            total_pages: pick(TOTAL_PAGES_KEYS),
            total_records: pick(TOTAL_RECORDS_KEYS),
        };
        if raw == Self::default() {
            None
        } else {
            Some(raw)
        }
    }
}

impl<'de> Deserialize<'de> for RawPagination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| D::Error::custom("no pagination fields found"))
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Canonical pagination, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationEnvelope {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_records: Option<u64>,
}

impl PaginationEnvelope {
    pub fn normalize(raw: &RawPagination, requested: PageRequest) -> Self {
        let current_page = raw
            .page
            .filter(|p| *p > 0)
            .map(clamp_u32)
            .unwrap_or(requested.page);
        let page_size = raw
            .page_size
            .filter(|s| *s > 0)
            .map(clamp_u32)
            .unwrap_or(requested.page_size);
        let total_pages = match (raw.total_pages, raw.total_records) {
            (Some(pages), _) => clamp_u32(pages),
            (None, Some(records)) => clamp_u32(records.div_ceil(u64::from(page_size.max(1)))),
            (None, None) => 1,
        };
        Self {
            current_page,
            page_size,
            total_pages,
            total_records: raw.total_records,
        }
    }
}

fn clamp_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// What the data table consumes.
///
/// `total` is a PAGE count. The record count, when known, lives in `total_records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub data: Vec<T>,
    pub total: u32,
    pub current_page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
}

/// Same shape as [`ListResult`]; produced by the free-text search box.
pub type SearchResult<T> = ListResult<T>;

impl<T> ListResult<T> {
    /// Result shown after a failed fetch: nothing to page through.
    pub fn empty(page_size: u32) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            current_page: 1,
            page_size,
            total_records: None,
        }
    }

    pub fn from_envelope(
        data: Vec<T>,
        pagination: Option<&RawPagination>,
        requested: PageRequest,
    ) -> Self {
        match pagination {
            Some(raw) => {
                let envelope = PaginationEnvelope::normalize(raw, requested);
                Self {
                    data,
                    total: envelope.total_pages,
                    current_page: envelope.current_page,
                    page_size: envelope.page_size,
                    total_records: envelope.total_records,
                }
            }
            None => {
                let count = data.len();
                Self {
                    total: if count == 0 { 1 } else { clamp_u32(count as u64) },
                    current_page: 1,
                    page_size: requested.page_size,
                    total_records: Some(count as u64),
                    data,
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            page_size: self.page_size,
            total_records: self.total_records,
        }
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}
