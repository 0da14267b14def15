//! `/projects` endpoints.

use serde_json::Value;

use super::{decode, encode, segment};
use crate::client::{ApiResult, RequestExecutor};
use crate::http::{Connector, ReqwestConnector};
use crate::models::{CreateProjectRequest, ListProjectsOptions, Paginated, Project, ProjectStatus};
use crate::time::{Sleeper, TokioSleeper};

/// Manages token sale projects.
#[derive(Debug)]
pub struct ProjectsService<'a, C: Connector = ReqwestConnector, S = TokioSleeper> {
    executor: &'a RequestExecutor<C, S>,
}

impl<'a, C: Connector, S: Sleeper> ProjectsService<'a, C, S> {
    /// Creates the service on top of `executor`.
    #[must_use]
    pub const fn new(executor: &'a RequestExecutor<C, S>) -> Self {
        Self { executor }
    }

    /// Creates a project after validating the request locally.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`](crate::client::ApiError::InvalidRequest)
    /// without contacting the API if the request is malformed, otherwise
    /// any error of [`RequestExecutor::execute`].
    pub async fn create(&self, request: &CreateProjectRequest) -> ApiResult<Project> {
        request.validate()?;
        let body = encode(request)?;
        decode(self.executor.post("/projects", Some(body)).await?)
    }

    /// Fetches a project by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`](crate::client::ApiError::NotFound) for
    /// unknown ids.
    pub async fn get(&self, project_id: &str) -> ApiResult<Project> {
        let path = format!("/projects/{}", segment(project_id)?);
        decode(self.executor.get(&path, Vec::new()).await?)
    }

    /// Lists projects.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn list(&self, options: &ListProjectsOptions) -> ApiResult<Paginated<Project>> {
        decode(self.executor.get("/projects", options.to_query()).await?)
    }

    /// Lists active projects only.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn active(&self, options: ListProjectsOptions) -> ApiResult<Paginated<Project>> {
        self.list(&options.with_status(ProjectStatus::Active)).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn update(&self, project_id: &str, updates: Value) -> ApiResult<Project> {
        let path = format!("/projects/{}", segment(project_id)?);
        decode(self.executor.patch(&path, updates).await?)
    }

    /// Starts the sale.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn launch(&self, project_id: &str) -> ApiResult<Project> {
        self.action(project_id, "launch").await
    }

    /// Pauses the sale.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn pause(&self, project_id: &str) -> ApiResult<Project> {
        self.action(project_id, "pause").await
    }

    /// Resumes a paused sale.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn resume(&self, project_id: &str) -> ApiResult<Project> {
        self.action(project_id, "resume").await
    }

    /// Cancels the project.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn cancel(&self, project_id: &str) -> ApiResult<Project> {
        self.action(project_id, "cancel").await
    }

    /// Fetches sale statistics.
    ///
    /// # Errors
    ///
    /// Any error of [`RequestExecutor::execute`].
    pub async fn stats(&self, project_id: &str) -> ApiResult<Value> {
        let path = format!("/projects/{}/stats", segment(project_id)?);
        self.executor.get(&path, Vec::new()).await
    }

    async fn action(&self, project_id: &str, action: &str) -> ApiResult<Project> {
        let path = format!("/projects/{}/{action}", segment(project_id)?);
        decode(self.executor.post(&path, None).await?)
    }
}
