use serde_json::{Map, Value};

/// One expanded ticket, ready to be sent as the `fields` of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub robot_number: i64,
    pub fields: Map<String, Value>,
}

impl Ticket {
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
impl Ticket {
    pub fn project_key(&self) -> Option<&str> {
        self.fields
            .get("project")
            .and_then(|project| project.get("key"))
            .and_then(Value::as_str)
    }

    pub fn issue_type_name(&self) -> Option<&str> {
        self.fields
            .get("issuetype")
            .and_then(|issue_type| issue_type.get("name"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    pub url: Option<String>,
}

/// An element of a bulk request that the server refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedIssue {
    /// Zero-based position of the ticket within its batch.
    pub element: usize,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkCreateOutcome {
    pub created: Vec<CreatedIssue>,
    pub failed: Vec<FailedIssue>,
}
