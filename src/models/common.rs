//! Pagination and sorting shared by list endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pagination block returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page, starting at 1
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a following page exists
    pub has_next: bool,
    /// Whether a preceding page exists
    pub has_prev: bool,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Pagination details
    pub pagination: PaginationInfo,
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page defaults shared by the list option types.
pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_LIMIT: u32 = 10;
pub(crate) const DEFAULT_SORT_BY: &str = "created_at";
