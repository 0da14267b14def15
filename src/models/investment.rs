//! Investments into projects.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT_BY};
use super::SortOrder;

/// Settlement state of an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Pending,
    Confirmed,
    Failed,
    Refunded,
}

impl InvestmentStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An investment made by an XRPL account into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub project_id: String,
    /// Classic address of the investing account
    pub investor_account: String,
    pub amount_xrp: String,
    pub token_amount: String,
    pub status: InvestmentStatus,
    /// Hash of the XRPL payment transaction
    pub transaction_hash: String,
    /// Tier the investment was priced at
    pub tier: u32,
    #[serde(deserialize_with = "super::serde_util::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp_opt::deserialize")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Filters and paging for `GET /investments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInvestmentsOptions {
    pub page: u32,
    pub limit: u32,
    pub project_id: Option<String>,
    pub investor_account: Option<String>,
    pub status: Option<InvestmentStatus>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListInvestmentsOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            project_id: None,
            investor_account: None,
            status: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListInvestmentsOptions {
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn with_investor(mut self, investor_account: impl Into<String>) -> Self {
        self.investor_account = Some(investor_account.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: InvestmentStatus) -> Self {
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
        if let Some(project_id) = &self.project_id {
            query.push(("project_id".to_string(), project_id.clone()));
        }
        if let Some(investor_account) = &self.investor_account {
            query.push(("investor_account".to_string(), investor_account.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        query.push(("sort_by".to_string(), self.sort_by.clone()));
        query.push(("sort_order".to_string(), self.sort_order.to_string()));
        query
    }
}
