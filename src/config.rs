use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::cmd::create::CreateArgs;
use crate::domain::robot::RobotRange;

pub const DEFAULT_SERVER: &str = "https://bnrobotics.atlassian.net";
pub const DEFAULT_ISSUE_TYPE: &str = "Task";
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub project: Option<String>,
    pub issue_type: String,
    pub range: RobotRange,
    pub batch_size: NonZeroUsize,
    pub dry_run: bool,
    pub robot_base: String,
    pub template: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: CreateArgs) -> Self {
        Self {
            server: args.server,
            user: args.user,
            password: args.password,
            project: args.project,
            issue_type: args.issue,
            range: RobotRange::new(args.start, args.end),
            batch_size: args.batchsize,
            dry_run: args.dryrun,
            robot_base: args.robotbase,
            template: args.template,
        }
    }
}
