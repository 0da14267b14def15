//! Token sale projects.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT_BY};
use super::SortOrder;
use crate::client::{ApiError, ApiResult};

static TOKEN_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{2,9}$").expect("token symbol pattern is valid"));

static TOTAL_SUPPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("total supply pattern is valid"));

const MAX_NAME_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Being prepared, not visible to investors
    Draft,
    /// Awaiting launch
    Pending,
    /// Sale is running
    Active,
    /// Sale has ended
    Completed,
    /// Sale was cancelled
    Cancelled,
}

impl ProjectStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pricing bracket of a project's sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTier {
    /// Tier number, starting at 1
    pub tier: u32,
    /// Price of one token in XRP
    pub price_per_token: String,
    /// Tokens allocated to the tier
    pub total_tokens: String,
    /// Tokens still available
    pub tokens_remaining: String,
    #[serde(default)]
    pub min_investment: Option<String>,
    #[serde(default)]
    pub max_investment: Option<String>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp_opt::deserialize")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp_opt::deserialize")]
    pub end_date: Option<DateTime<Utc>>,
}

/// A token sale project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub token_symbol: String,
    pub total_supply: String,
    pub sale_supply: String,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    pub status: ProjectStatus,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub sale_start_date: DateTime<Utc>,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub sale_end_date: DateTime<Utc>,
    pub tiers: Vec<ProjectTier>,
    pub current_tier: u32,
    /// Total XRP raised so far
    pub total_raised: String,
    pub investor_count: u64,
    pub is_active: bool,
}

/// Body of `POST /projects`.
///
/// Call [`validate`](Self::validate) (the projects service does so before
/// sending) to catch malformed input without a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// 1 to 100 characters
    pub name: String,
    /// 1 to 2000 characters
    pub description: String,
    /// Upper-case symbol of 3 to 10 characters, starting with a letter
    pub token_symbol: String,
    /// Whole number of tokens, as a decimal string
    pub total_supply: String,
    /// Tier configurations; at least one is required
    pub tiers: Vec<Value>,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub sale_start_date: DateTime<Utc>,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub sale_end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CreateProjectRequest {
    /// Checks the field constraints enforced by the API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] naming the first offending field.
    pub fn validate(&self) -> ApiResult<()> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_CHARS {
            return Err(invalid(format!(
                "name must be 1 to {MAX_NAME_CHARS} characters, got {name_len}"
            )));
        }

        let description_len = self.description.chars().count();
        if description_len == 0 || description_len > MAX_DESCRIPTION_CHARS {
            return Err(invalid(format!(
                "description must be 1 to {MAX_DESCRIPTION_CHARS} characters, got {description_len}"
            )));
        }

        if !TOKEN_SYMBOL.is_match(&self.token_symbol) {
            return Err(invalid(format!(
                "token_symbol '{}' must match {}",
                self.token_symbol,
                TOKEN_SYMBOL.as_str()
            )));
        }

        if !TOTAL_SUPPLY.is_match(&self.total_supply) {
            return Err(invalid(format!(
                "total_supply '{}' must be a whole number",
                self.total_supply
            )));
        }

        if self.tiers.is_empty() {
            return Err(invalid("At least one tier is required".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ApiError {
    ApiError::InvalidRequest(message)
}

/// Filters and paging for `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProjectsOptions {
    pub page: u32,
    pub limit: u32,
    pub status: Option<ProjectStatus>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListProjectsOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListProjectsOptions {
    /// Restricts the listing to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query parameters, omitting unset filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        query.push(("sort_by".to_string(), self.sort_by.clone()));
        query.push(("sort_order".to_string(), self.sort_order.to_string()));
        query
    }
}
