use std::io::Write;
use std::num::NonZeroUsize;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ticket::{CreatedIssue, FailedIssue, Ticket};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

#[derive(Debug, Default)]
pub struct SubmitReport {
    pub batches: usize,
    pub created: Vec<CreatedIssue>,
    pub failed: Vec<FailedIssue>,
}

/// Contiguous, non-empty slices of at most `batch_size` tickets, in order.
pub fn partition(
    tickets: &[Ticket],
    batch_size: NonZeroUsize,
) -> impl Iterator<Item = &[Ticket]> {
    tickets.chunks(batch_size.get())
}

pub fn batch_count(tickets: &[Ticket], batch_size: NonZeroUsize) -> usize {
    tickets.len().div_ceil(batch_size.get())
}

pub fn render_batch(batch: &[Ticket]) -> AppResult<String> {
    let fields = batch
        .iter()
        .map(|ticket| Value::Object(ticket.fields.clone()))
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&fields)
        .map_err(|err| AppError::Template(format!("failed to render tickets: {err}")))
}

/// Prints every batch without contacting the tracker.
pub fn print_batches<W: Write>(
    tickets: &[Ticket],
    batch_size: NonZeroUsize,
    out: &mut W,
) -> AppResult<SubmitReport> {
    let total = batch_count(tickets, batch_size);
    for (index, batch) in partition(tickets, batch_size).enumerate() {
        writeln!(out, "# batch {}/{total}", index + 1)?;
        writeln!(out, "{}", render_batch(batch)?)?;
    }
    Ok(SubmitReport {
        batches: total,
        ..SubmitReport::default()
    })
}

/// Sends each batch as one bulk create call. The first failing call aborts
/// the run; batches already sent stay created.
pub async fn submit_batches<W: Write>(
    tracker: &dyn IssueTrackerService,
    tickets: &[Ticket],
    batch_size: NonZeroUsize,
    out: &mut W,
) -> AppResult<SubmitReport> {
    let total = batch_count(tickets, batch_size);
    let mut report = SubmitReport::default();

    for (index, batch) in partition(tickets, batch_size).enumerate() {
        info!(batch = index + 1, total, size = batch.len(), "submitting batch");
        let outcome = tracker.create_issues(batch).await?;
        report.batches += 1;

        for issue in outcome.created {
            debug!(id = %issue.id, url = issue.url.as_deref(), "created issue");
            writeln!(out, "Created {}", issue.key)?;
            report.created.push(issue);
        }
        for failure in outcome.failed {
            let ticket = batch.get(failure.element);
            warn!(
                batch = index + 1,
                element = failure.element,
                robot = ticket.map(|ticket| ticket.robot_number),
                summary = ticket.and_then(|ticket| ticket.field_str("summary")),
                status = failure.status,
                "failed to create ticket: {}",
                failure.message
            );
            report.failed.push(failure);
        }
    }

    Ok(report)
}
