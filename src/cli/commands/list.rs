//! List command implementation.

use anyhow::Result;

use super::open_service;
use crate::config::Config;
use crate::format::format_summary_line;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let summaries = open_service(config).list_summaries()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if summaries.is_empty() {
        println!("No tickets found.");
    } else {
        for summary in &summaries {
            println!("{}", format_summary_line(summary));
        }
        println!("\n{} ticket(s)", summaries.len());
    }

    Ok(())
}
