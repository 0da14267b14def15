//! `/analytics` endpoints.

use serde_json::Value;

use super::{decode, segment};
use crate::client::{ApiResult, RequestExecutor};
use crate::http::{Connector, ReqwestConnector};
use crate::models::{Analytics, ProjectAnalytics, ProjectAnalyticsQuery};
use crate::time::{Sleeper, TokioSleeper};

/// Period used by [`AnalyticsService::trends`] when none is given.
pub const DEFAULT_TRENDS_PERIOD: &str = "30d";

/// Reporting over platform, project and investor activity.
#[derive(Debug)]
pub struct AnalyticsService<'a, C: Connector = ReqwestConnector, S = TokioSleeper> {
    executor: &'a RequestExecutor<C, S>,
}

impl<'a, C: Connector, S: Sleeper> AnalyticsService<'a, C, S> {
    #[must_use]
    pub const fn new(executor: &'a RequestExecutor<C, S>) -> Self {
        Self { executor }
    }

    /// Platform-wide totals.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn platform(&self) -> ApiResult<Analytics> {
        decode(self.executor.get("/analytics/platform", Vec::new()).await?)
    }

    /// Figures for one project, optionally limited to a date range.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn project(
        &self,
        project_id: &str,
        query: &ProjectAnalyticsQuery,
    ) -> ApiResult<ProjectAnalytics> {
        let path = format!("/analytics/projects/{}", segment(project_id)?);
        decode(self.executor.get(&path, query.to_query()).await?)
    }

    /// Figures for one investor account.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn investor(&self, investor_account: &str) -> ApiResult<Value> {
        let path = format!("/analytics/investors/{}", segment(investor_account)?);
        self.executor.get(&path, Vec::new()).await
    }

    /// Market trends over `period` (default `30d`).
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn trends(&self, period: Option<&str>) -> ApiResult<Value> {
        let period = period.unwrap_or(DEFAULT_TRENDS_PERIOD);
        self.executor
            .get("/analytics/trends", vec![("period".to_string(), period.to_string())])
            .await
    }

    /// Tier system figures.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn tiers(&self) -> ApiResult<Value> {
        self.executor.get("/analytics/tiers", Vec::new()).await
    }

    /// Requests a data export.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn export(&self, options: Value) -> ApiResult<Value> {
        self.executor
            .post("/analytics/export", Some(options))
            .await
    }
}
