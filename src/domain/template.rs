use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::domain::issue_type::IssueType;
use crate::domain::project::Project;
use crate::domain::robot::{RobotRange, robot_name};
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};

pub const ROBOT_PLACEHOLDER: &str = "%ROBOT%";
pub const ROBOT_NUMBER_PLACEHOLDER: &str = "%ROBOTNUM%";

/// Upper bound on the tickets a single run may expand.
pub const MAX_TICKETS: usize = 100_000;

/// Field map shared by every ticket of a run, before substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTemplate {
    fields: Map<String, Value>,
}

impl TicketTemplate {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Template(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::parse(&contents)
            .map_err(|err| AppError::Template(format!("{}: {err}", path.display())))
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(contents) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err("template must be a JSON object".to_string()),
            Err(err) => Err(format!("invalid JSON: {err}")),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn expand(
        &self,
        range: RobotRange,
        robot_base: &str,
        project: &Project,
        issue_type: &IssueType,
    ) -> AppResult<Vec<Ticket>> {
        if range.len() > MAX_TICKETS {
            return Err(AppError::Configuration(format!(
                "robot range {}..={} has {} robots, over the limit of {MAX_TICKETS}",
                range.start,
                range.end,
                range.len()
            )));
        }

        Ok(range
            .numbers()
            .map(|number| self.render(number, robot_base, project, issue_type))
            .collect())
    }

    fn render(
        &self,
        number: i64,
        robot_base: &str,
        project: &Project,
        issue_type: &IssueType,
    ) -> Ticket {
        let robot = robot_name(robot_base, number);
        let number_text = number.to_string();

        let mut fields = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), substitute(value, &robot, &number_text)))
            .collect::<Map<String, Value>>();

        fields.insert("project".to_string(), json!({ "key": project.key }));
        fields.insert("issuetype".to_string(), json!({ "name": issue_type.name }));

        Ticket {
            robot_number: number,
            fields,
        }
    }
}

fn substitute(value: &Value, robot: &str, number: &str) -> Value {
    match value {
        Value::String(text) => Value::String(substitute_text(text, robot, number)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute(item, robot, number))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, item)| (name.clone(), substitute(item, robot, number)))
                .collect(),
        ),
        other => other.clone(),
    }
}

// %ROBOTNUM% shares its prefix with %ROBOT% but the trailing '%' keeps the
// two tokens from overlapping, so replacement order does not matter.
fn substitute_text(text: &str, robot: &str, number: &str) -> String {
    if !text.contains(ROBOT_PLACEHOLDER) && !text.contains(ROBOT_NUMBER_PLACEHOLDER) {
        return text.to_string();
    }
    text.replace(ROBOT_PLACEHOLDER, robot)
        .replace(ROBOT_NUMBER_PLACEHOLDER, number)
}
