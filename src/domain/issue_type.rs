use serde::Deserialize;

use crate::domain::project::Project;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scope: Option<IssueTypeScope>,
}

/// Present on issue types that belong to a single (next-gen) project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTypeScope {
    pub project: ScopeProject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScopeProject {
    pub id: String,
}

impl IssueType {
    pub fn is_available_in(&self, project: &Project) -> bool {
        match &self.scope {
            None => true,
            Some(scope) => scope.project.id == project.id,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        self.name == query || self.id == query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            key: "ROB".to_string(),
            name: "Robot Fleet".to_string(),
        }
    }

    #[test]
    fn unscoped_issue_type_is_available_everywhere() {
        let payload = r#"{"id": "10001", "name": "Task", "subtask": false}"#;
        let issue_type: IssueType = serde_json::from_str(payload).unwrap();
        assert!(issue_type.scope.is_none());
        assert!(issue_type.is_available_in(&project("1")));
        assert!(issue_type.is_available_in(&project("2")));
    }

    #[test]
    fn scoped_issue_type_is_limited_to_its_project() {
        let payload = r#"{
            "id": "10020",
            "name": "Task",
            "scope": {"type": "PROJECT", "project": {"id": "10000"}}
        }"#;
        let issue_type: IssueType = serde_json::from_str(payload).unwrap();
        assert!(issue_type.is_available_in(&project("10000")));
        assert!(!issue_type.is_available_in(&project("10001")));
    }

    #[test]
    fn matches_name_or_id() {
        let issue_type = IssueType {
            id: "10001".to_string(),
            name: "Task".to_string(),
            scope: None,
        };
        assert!(issue_type.matches("Task"));
        assert!(issue_type.matches("10001"));
        assert!(!issue_type.matches("Bug"));
    }
}
