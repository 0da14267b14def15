//! `/investments` endpoints.

use serde_json::Value;

use super::{decode, segment};
use crate::client::{ApiResult, RequestExecutor};
use crate::http::{Connector, ReqwestConnector};
use crate::models::{Investment, InvestmentStatus, ListInvestmentsOptions, Paginated};
use crate::time::{Sleeper, TokioSleeper};

/// Queries and records investments.
#[derive(Debug)]
pub struct InvestmentsService<'a, C: Connector = ReqwestConnector, S = TokioSleeper> {
    executor: &'a RequestExecutor<C, S>,
}

impl<'a, C: Connector, S: Sleeper> InvestmentsService<'a, C, S> {
    #[must_use]
    pub const fn new(executor: &'a RequestExecutor<C, S>) -> Self {
        Self { executor }
    }

    /// Fetches an investment by id.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn get(&self, investment_id: &str) -> ApiResult<Investment> {
        let path = format!("/investments/{}", segment(investment_id)?);
        decode(self.executor.get(&path, Vec::new()).await?)
    }

    /// Lists investments matching `options`.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn list(&self, options: &ListInvestmentsOptions) -> ApiResult<Paginated<Investment>> {
        decode(self.executor.get("/investments", options.to_query()).await?)
    }

    /// Lists investments into one project.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn by_project(
        &self,
        project_id: &str,
        options: ListInvestmentsOptions,
    ) -> ApiResult<Paginated<Investment>> {
        self.list(&options.with_project(project_id)).await
    }

    /// Lists investments made by one account.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn by_investor(
        &self,
        investor_account: &str,
        options: ListInvestmentsOptions,
    ) -> ApiResult<Paginated<Investment>> {
        self.list(&options.with_investor(investor_account)).await
    }

    /// Lists confirmed investments.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn confirmed(&self, options: ListInvestmentsOptions) -> ApiResult<Paginated<Investment>> {
        self.list(&options.with_status(InvestmentStatus::Confirmed))
            .await
    }

    /// Lists pending investments.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn pending(&self, options: ListInvestmentsOptions) -> ApiResult<Paginated<Investment>> {
        self.list(&options.with_status(InvestmentStatus::Pending))
            .await
    }

    /// Records a new investment.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn create(&self, investment: Value) -> ApiResult<Investment> {
        decode(self.executor.post("/investments", Some(investment)).await?)
    }

    /// Fetches the investment summary of an account.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn investor_summary(&self, investor_account: &str) -> ApiResult<Value> {
        let path = format!("/investments/summary/{}", segment(investor_account)?);
        self.executor.get(&path, Vec::new()).await
    }

    /// Prices an investment without making it.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn simulate(&self, simulation: Value) -> ApiResult<Value> {
        self.executor
            .post("/investments/simulate", Some(simulation))
            .await
    }
}
