//! Typed records exchanged with the XRPL.Sale API.
//!
//! Monetary amounts (XRP and token quantities) are kept as the decimal
//! strings the API sends, so no precision is lost in transit.

mod analytics;
mod auth;
mod common;
mod investment;
mod project;
pub(crate) mod serde_util;


pub use analytics::{Analytics, ProjectAnalytics, ProjectAnalyticsQuery};
pub use auth::{AuthRequest, AuthResponse, UserTier};
pub use common::{Paginated, PaginationInfo, SortOrder};
pub use investment::{Investment, InvestmentStatus, ListInvestmentsOptions};
pub use project::{CreateProjectRequest, ListProjectsOptions, Project, ProjectStatus, ProjectTier};
