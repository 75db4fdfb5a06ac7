use tracing::{info, warn};

use crate::domain::issue_type::IssueType;
use crate::domain::project::Project;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

/// Looks up the project and issue type every ticket of the run is filed under.
pub async fn resolve_targets(
    tracker: &dyn IssueTrackerService,
    project_query: Option<&str>,
    issue_query: &str,
) -> AppResult<(Project, IssueType)> {
    let project_query = project_query
        .ok_or_else(|| AppError::Configuration("no project configured".to_string()))?;

    let projects = tracker.projects().await?;
    let project = resolve_project(&projects, project_query)?.clone();
    info!(key = %project.key, id = %project.id, "resolved project");

    let issue_types = tracker.issue_types().await?;
    let issue_type = resolve_issue_type(&issue_types, &project, issue_query)?.clone();
    info!(name = %issue_type.name, id = %issue_type.id, "resolved issue type");

    Ok((project, issue_type))
}

pub fn resolve_project<'a>(projects: &'a [Project], query: &str) -> AppResult<&'a Project> {
    let mut matches = projects.iter().filter(|project| project.matches(query));
    let project = matches.next().ok_or_else(|| AppError::NotFound {
        kind: "a project",
        query: query.to_string(),
    })?;

    let others = matches.count();
    if others > 0 {
        warn!(
            query,
            chosen = %project.key,
            others,
            "several projects match, using the first"
        );
    }
    Ok(project)
}

pub fn resolve_issue_type<'a>(
    issue_types: &'a [IssueType],
    project: &Project,
    query: &str,
) -> AppResult<&'a IssueType> {
    let mut matches = issue_types
        .iter()
        .filter(|issue_type| issue_type.is_available_in(project))
        .filter(|issue_type| issue_type.matches(query));
    let issue_type = matches.next().ok_or_else(|| AppError::NotFound {
        kind: "an issue type",
        query: query.to_string(),
    })?;

    let others = matches.count();
    if others > 0 {
        warn!(
            query,
            chosen = %issue_type.id,
            others,
            "several issue types match, using the first"
        );
    }
    Ok(issue_type)
}

#[cfg(test)]
mod tests {
    use crate::domain::issue_type::{IssueTypeScope, ScopeProject};

    use super::*;

    fn project(id: &str, key: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            key: key.to_string(),
            name: name.to_string(),
        }
    }

    fn issue_type(id: &str, name: &str, scope: Option<&str>) -> IssueType {
        IssueType {
            id: id.to_string(),
            name: name.to_string(),
            scope: scope.map(|project_id| IssueTypeScope {
                project: ScopeProject {
                    id: project_id.to_string(),
                },
            }),
        }
    }

    fn projects() -> Vec<Project> {
        vec![
            project("10000", "OPS", "Operations"),
            project("10001", "ROB", "Robot Fleet"),
            project("10002", "FLEET", "ROB"),
        ]
    }

    #[test]
    fn finds_project_by_key_name_or_id() {
        let projects = projects();
        assert_eq!(resolve_project(&projects, "OPS").unwrap().id, "10000");
        assert_eq!(resolve_project(&projects, "Robot Fleet").unwrap().key, "ROB");
        assert_eq!(resolve_project(&projects, "10002").unwrap().key, "FLEET");
    }

    #[test]
    fn first_matching_project_wins() {
        let projects = projects();
        let project = resolve_project(&projects, "ROB").unwrap();
        assert_eq!(project.id, "10001");
    }

    #[test]
    fn unknown_project_names_the_query() {
        let err = resolve_project(&projects(), "NOPE").unwrap_err();
        assert!(matches!(&err, AppError::NotFound { query, .. } if query == "NOPE"));
        assert_eq!(err.to_string(), "could not find a project matching NOPE");
    }

    #[test]
    fn issue_type_lookup_skips_types_scoped_to_other_projects() {
        let rob = project("10001", "ROB", "Robot Fleet");
        let issue_types = vec![
            issue_type("20000", "Task", Some("10000")),
            issue_type("20001", "Task", Some("10001")),
            issue_type("10003", "Task", None),
        ];

        let chosen = resolve_issue_type(&issue_types, &rob, "Task").unwrap();
        assert_eq!(chosen.id, "20001");
    }

    #[test]
    fn issue_type_lookup_matches_id() {
        let rob = project("10001", "ROB", "Robot Fleet");
        let issue_types = vec![
            issue_type("10003", "Task", None),
            issue_type("10004", "Bug", None),
        ];

        let chosen = resolve_issue_type(&issue_types, &rob, "10004").unwrap();
        assert_eq!(chosen.name, "Bug");
    }

    #[test]
    fn issue_type_only_available_elsewhere_is_not_found() {
        let rob = project("10001", "ROB", "Robot Fleet");
        let issue_types = vec![issue_type("20000", "Robot Check", Some("10000"))];

        let err = resolve_issue_type(&issue_types, &rob, "Robot Check").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not find an issue type matching Robot Check"
        );
    }
}
