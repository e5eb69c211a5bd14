//! Show command implementation.

use anyhow::Result;

use super::open_service;
use crate::config::Config;
use crate::format::format_ticket_details;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded or the ticket is not found.
pub fn execute(config: &Config, id: &str, json: bool) -> Result<()> {
    let ticket = open_service(config).get_by_id(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        println!("{}", format_ticket_details(&ticket));
    }

    Ok(())
}
