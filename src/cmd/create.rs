use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::batch::{BatchOutcome, create_tickets_from_template};

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// The Jira server URL.
    #[arg(
        short = 'S',
        long,
        env = "JIRA_SERVER",
        default_value = crate::config::DEFAULT_SERVER
    )]
    pub server: String,

    /// The Jira password for <user>. An API token works where the account
    /// password does not.
    #[arg(short = 'p', long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub password: Option<String>,

    /// The Jira user name, typically an email address.
    #[arg(short = 'u', long, env = "JIRA_USER")]
    pub user: Option<String>,

    /// The project name, key or id under which to create the tickets.
    #[arg(short = 'P', long)]
    pub project: Option<String>,

    /// The issue type name or id of the tickets.
    #[arg(short = 'i', long, default_value = crate::config::DEFAULT_ISSUE_TYPE)]
    pub issue: String,

    /// The robot number to start with.
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub start: i64,

    /// The robot number to end on (inclusive).
    #[arg(short = 'e', long, allow_negative_numbers = true)]
    pub end: i64,

    /// Number of tickets sent per bulk create call.
    #[arg(short = 'b', long, default_value_t = crate::config::DEFAULT_BATCH_SIZE)]
    pub batchsize: NonZeroUsize,

    /// Do everything except creating the tickets; print them instead.
    #[arg(short = 'd', long)]
    pub dryrun: bool,

    /// The base name of the robot, e.g. atlasoscar.
    #[arg(short = 'r', long, default_value = "")]
    pub robotbase: String,

    /// The JSON template of the ticket, for example
    /// {"summary": "Create keys for %ROBOT%", "description": "..."}.
    /// Project and issue type are added. %ROBOT% is replaced with the full
    /// robot name and %ROBOTNUM% with the robot number.
    #[arg(short = 't', long)]
    pub template: PathBuf,
}

pub async fn run(ctx: &AppContext) -> AppResult<BatchOutcome> {
    let mut stdout = io::stdout();
    create_tickets_from_template(ctx, &mut stdout).await
}
