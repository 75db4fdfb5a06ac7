use std::io::Write;

use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::template::TicketTemplate;
use crate::error::AppResult;
use crate::workflow::resolve::resolve_targets;
use crate::workflow::submit::{SubmitReport, print_batches, submit_batches};

pub struct BatchOutcome {
    pub tickets: usize,
    pub dry_run: bool,
    pub report: SubmitReport,
}

pub async fn create_tickets_from_template<W: Write>(
    ctx: &AppContext,
    out: &mut W,
) -> AppResult<BatchOutcome> {
    let config = &ctx.config;

    let (project, issue_type) = resolve_targets(
        ctx.issue_tracker.as_ref(),
        config.project.as_deref(),
        &config.issue_type,
    )
    .await?;

    let template = TicketTemplate::load(&config.template)?;
    info!(
        path = %config.template.display(),
        fields = template.fields().len(),
        "loaded ticket template"
    );

    if config.range.is_empty() {
        warn!(
            start = config.range.start,
            end = config.range.end,
            "robot range is empty, no tickets will be created"
        );
    }

    let tickets =
        template.expand(config.range, &config.robot_base, &project, &issue_type)?;
    info!(
        count = tickets.len(),
        start = config.range.start,
        end = config.range.end,
        "expanded tickets"
    );

    let report = if config.dry_run {
        print_batches(&tickets, config.batch_size, out)?
    } else {
        submit_batches(ctx.issue_tracker.as_ref(), &tickets, config.batch_size, out).await?
    };

    Ok(BatchOutcome {
        tickets: tickets.len(),
        dry_run: config.dry_run,
        report,
    })
}
