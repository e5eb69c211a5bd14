//! Text formatting functions for `helpdesk`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ✓)
//! - Creation timestamps
//! - Ticket line and detail formatting

use chrono::{DateTime, Utc};

use crate::model::{Ticket, TicketSummary};

/// Status icon characters.
pub mod icons {
    /// Open ticket (hollow circle).
    pub const OPEN: &str = "○";
    /// Done ticket (checkmark).
    pub const DONE: &str = "✓";
}

/// Return the icon character for a status flag.
#[must_use]
pub const fn format_status_icon(done: bool) -> &'static str {
    if done { icons::DONE } else { icons::OPEN }
}

#[must_use]
pub const fn format_status_label(done: bool) -> &'static str {
    if done { "done" } else { "open" }
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM` UTC.
///
/// Out-of-range values fall back to the raw number.
#[must_use]
pub fn format_created(created_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(created_ms).map_or_else(
        || created_ms.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Format a single-line ticket summary.
///
/// Format: `{icon} {id} {created} {name}`
#[must_use]
pub fn format_summary_line(summary: &TicketSummary) -> String {
    format!(
        "{} {} {} {}",
        format_status_icon(summary.status),
        summary.id,
        format_created(summary.created),
        summary.name,
    )
}

/// Format a full ticket for `show`.
#[must_use]
pub fn format_ticket_details(ticket: &Ticket) -> String {
    let mut out = format!(
        "{} {} [{}]\nCreated: {}",
        ticket.id,
        ticket.name,
        format_status_label(ticket.status),
        format_created(ticket.created),
    );
    if !ticket.description.is_empty() {
        out.push_str("\n\n");
        out.push_str(&ticket.description);
    }
    out
}
