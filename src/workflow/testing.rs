use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::issue_type::IssueType;
use crate::domain::project::Project;
use crate::domain::ticket::{BulkCreateOutcome, CreatedIssue, FailedIssue, Ticket};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

/// In-memory tracker that records the robot numbers of every bulk call.
#[derive(Default)]
pub struct FakeTracker {
    pub projects: Vec<Project>,
    pub issue_types: Vec<IssueType>,
    /// One-based index of the bulk call that should fail outright.
    pub fail_on_call: Option<usize>,
    /// Robot number the server refuses inside an otherwise accepted batch.
    pub reject_robot: Option<i64>,
    pub calls: Mutex<Vec<Vec<i64>>>,
}

impl FakeTracker {
    pub fn with_fleet() -> Self {
        Self {
            projects: vec![
                Project {
                    id: "10000".to_string(),
                    key: "OPS".to_string(),
                    name: "Operations".to_string(),
                },
                Project {
                    id: "10001".to_string(),
                    key: "ROB".to_string(),
                    name: "Robot Fleet".to_string(),
                },
            ],
            issue_types: vec![
                IssueType {
                    id: "10003".to_string(),
                    name: "Task".to_string(),
                    scope: None,
                },
                IssueType {
                    id: "10004".to_string(),
                    name: "Bug".to_string(),
                    scope: None,
                },
            ],
            ..Self::default()
        }
    }

    pub fn bulk_calls(&self) -> Vec<Vec<i64>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn issue_types(&self) -> AppResult<Vec<IssueType>> {
        Ok(self.issue_types.clone())
    }

    async fn create_issues(&self, tickets: &[Ticket]) -> AppResult<BulkCreateOutcome> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(tickets.iter().map(|ticket| ticket.robot_number).collect());
        if self.fail_on_call == Some(calls.len()) {
            return Err(AppError::IssueTracker(
                "Jira responded with 500 Internal Server Error".to_string(),
            ));
        }

        let mut outcome = BulkCreateOutcome::default();
        for (element, ticket) in tickets.iter().enumerate() {
            if self.reject_robot == Some(ticket.robot_number) {
                outcome.failed.push(FailedIssue {
                    element,
                    status: Some(400),
                    message: "summary: You must specify a summary of the issue.".to_string(),
                });
            } else {
                outcome.created.push(CreatedIssue {
                    id: (20_000 + ticket.robot_number).to_string(),
                    key: format!("ROB-{}", ticket.robot_number),
                    url: None,
                });
            }
        }
        Ok(outcome)
    }
}

pub fn ticket(robot_number: i64, summary: &str) -> Ticket {
    let Value::Object(fields) = json!({
        "summary": summary,
        "project": {"key": "ROB"},
        "issuetype": {"name": "Task"}
    }) else {
        unreachable!("json! object literal")
    };
    Ticket {
        robot_number,
        fields,
    }
}
