mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use crate::cmd::create::{self, CreateArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::jira::JiraClient;

#[derive(Parser)]
#[command(
    name = "robot-tickets",
    author,
    version,
    about = "Create a batch of Jira tickets, one per robot, from a JSON template"
)]
struct Cli {
    #[command(flatten)]
    create: CreateArgs,

    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli.create).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: CreateArgs) -> AppResult<()> {
    let config = AppConfig::from_args(args);

    let issue_tracker = Arc::new(
        JiraClient::connect(
            &config.server,
            config.user.as_deref(),
            config.password.as_deref(),
        )
        .await?,
    );
    info!(server = %config.server, "connected to Jira");

    let context = AppContext::new(config, issue_tracker);
    let outcome = create::run(&context).await?;

    if outcome.dry_run {
        info!(
            tickets = outcome.tickets,
            batches = outcome.report.batches,
            "dry run, nothing submitted"
        );
        return Ok(());
    }

    info!(
        "Created {} of {} tickets in {} batches",
        outcome.report.created.len(),
        outcome.tickets,
        outcome.report.batches
    );
    if !outcome.report.failed.is_empty() {
        eprintln!(
            "Warning: {} of {} tickets were rejected by Jira.",
            outcome.report.failed.len(),
            outcome.tickets
        );
    }

    Ok(())
}
