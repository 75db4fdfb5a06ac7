use async_trait::async_trait;

use crate::domain::issue_type::IssueType;
use crate::domain::project::Project;
use crate::domain::ticket::{BulkCreateOutcome, Ticket};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn projects(&self) -> AppResult<Vec<Project>>;
    async fn issue_types(&self) -> AppResult<Vec<IssueType>>;
    async fn create_issues(&self, tickets: &[Ticket]) -> AppResult<BulkCreateOutcome>;
}
