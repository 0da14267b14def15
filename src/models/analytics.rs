//! Platform and project analytics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Investment, Project};

/// Platform-wide figures from `GET /analytics/platform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_raised_xrp: String,
    pub total_projects: u64,
    pub active_projects: u64,
    pub total_investors: u64,
    pub average_investment: String,
    pub top_projects: Vec<Project>,
    pub recent_investments: Vec<Investment>,
}

/// Per-project figures from `GET /analytics/projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalytics {
    pub project_id: String,
    pub total_raised_xrp: String,
    pub investor_count: u64,
    pub current_tier: u32,
    /// Share of the sale supply sold, 0 to 100
    pub completion_percentage: f64,
    /// Free-form per-tier breakdown
    pub tier_distribution: Vec<Value>,
    /// Free-form per-day breakdown
    pub daily_investments: Vec<Value>,
}

/// Optional range and bucketing for project analytics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectAnalyticsQuery {
    /// Inclusive start date, e.g. `2025-01-01`
    pub start_date: Option<String>,
    /// Inclusive end date
    pub end_date: Option<String>,
    /// Bucket size, e.g. `day` or `week`
    pub granularity: Option<String>,
}

impl ProjectAnalyticsQuery {
    /// Query parameters for the fields that are set.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("granularity", &self.granularity),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
        .collect()
    }
}
