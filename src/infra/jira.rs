use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::issue_type::IssueType;
use crate::domain::project::Project;
use crate::domain::ticket::{BulkCreateOutcome, CreatedIssue, FailedIssue, Ticket};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const API_PREFIX: &str = "rest/api/2";

pub struct JiraClient {
    http: Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// Builds a client for `base_url` and checks the credentials against the
    /// server before returning it.
    pub async fn connect(
        base_url: &str,
        user: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<Self> {
        let user = user
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Configuration("Jira user not configured".to_string()))?;
        let password = password
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Configuration("Jira password not configured".to_string()))?;

        let client = Self {
            http: Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            auth_header: Self::auth_header(user, password),
        };
        client.authenticate(user).await?;
        Ok(client)
    }

    async fn authenticate(&self, user: &str) -> AppResult<()> {
        let url = self.endpoint("myself");
        debug!(%url, user, "verifying Jira credentials");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                AppError::Authentication(format!("failed to reach {}: {err}", self.base_url))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Authentication(format!(
                "Jira rejected the credentials for {user} ({status})"
            )));
        }
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(AppError::Authentication(format!(
                "Jira responded with {status}: {body}"
            )));
        }
        Ok(())
    }

    fn auth_header(user: &str, password: &str) -> String {
        let credentials = format!("{user}:{password}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{API_PREFIX}/{resource}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> AppResult<T> {
        let url = self.endpoint(resource);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status} for {resource}: {body}"
            )));
        }

        response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira {resource} response: {err}"))
        })
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn projects(&self) -> AppResult<Vec<Project>> {
        self.get_json("project").await
    }

    async fn issue_types(&self) -> AppResult<Vec<IssueType>> {
        self.get_json("issuetype").await
    }

    async fn create_issues(&self, tickets: &[Ticket]) -> AppResult<BulkCreateOutcome> {
        if tickets.is_empty() {
            return Ok(BulkCreateOutcome::default());
        }

        let url = self.endpoint("issue/bulk");
        debug!(%url, count = tickets.len(), "POST");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&BulkCreateRequest::new(tickets))
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        let body = read_body(response).await;

        // Jira answers 400 when every element of the batch was rejected, with
        // the per-element reasons in the usual response body.
        if status.is_success() || status == StatusCode::BAD_REQUEST {
            if let Ok(payload) = serde_json::from_str::<BulkCreateResponse>(&body) {
                if status.is_success() || !payload.errors.is_empty() {
                    return Ok(payload.into_outcome());
                }
            }
        }

        if status.is_success() {
            return Err(AppError::IssueTracker(format!(
                "failed to parse Jira bulk create response: {body}"
            )));
        }
        Err(AppError::IssueTracker(format!(
            "Jira responded with {status}: {body}"
        )))
    }
}

async fn read_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string())
}

#[derive(Serialize)]
struct BulkCreateRequest<'a> {
    #[serde(rename = "issueUpdates")]
    issue_updates: Vec<IssueUpdate<'a>>,
}

impl<'a> BulkCreateRequest<'a> {
    fn new(tickets: &'a [Ticket]) -> Self {
        Self {
            issue_updates: tickets
                .iter()
                .map(|ticket| IssueUpdate {
                    fields: &ticket.fields,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct IssueUpdate<'a> {
    fields: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct BulkCreateResponse {
    #[serde(default)]
    issues: Vec<CreatedIssueResponse>,
    #[serde(default)]
    errors: Vec<BulkErrorResponse>,
}

impl BulkCreateResponse {
    fn into_outcome(self) -> BulkCreateOutcome {
        BulkCreateOutcome {
            created: self
                .issues
                .into_iter()
                .map(|issue| CreatedIssue {
                    id: issue.id,
                    key: issue.key,
                    url: issue.self_url,
                })
                .collect(),
            failed: self
                .errors
                .into_iter()
                .map(BulkErrorResponse::into_failed)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct CreatedIssueResponse {
    id: String,
    key: String,
    #[serde(rename = "self")]
    self_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkErrorResponse {
    status: Option<u16>,
    #[serde(default)]
    failed_element_number: usize,
    #[serde(default)]
    element_errors: ElementErrors,
}

impl BulkErrorResponse {
    fn into_failed(self) -> FailedIssue {
        FailedIssue {
            element: self.failed_element_number,
            status: self.status,
            message: self.element_errors.describe(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementErrors {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: Map<String, Value>,
}

impl ElementErrors {
    fn describe(&self) -> String {
        let field_errors = self.errors.iter().map(|(field, message)| match message {
            Value::String(text) => format!("{field}: {text}"),
            other => format!("{field}: {other}"),
        });
        let parts = self
            .error_messages
            .iter()
            .cloned()
            .chain(field_errors)
            .collect::<Vec<_>>();

        if parts.is_empty() {
            "no reason given".to_string()
        } else {
            parts.join("; ")
        }
    }
}
