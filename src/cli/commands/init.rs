//! Init command implementation.

use anyhow::Result;

use super::open_service;
use crate::config::Config;
use crate::{JsonFileStore, StoreHealth};

/// Execute the init command.
///
/// Leaves a valid store alone unless `force` is set; a missing or corrupt
/// store is reset to the seed tickets.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn execute(config: &Config, force: bool) -> Result<()> {
    let path = config.resolved_data_file();

    if force {
        let doc = open_service(config).reset()?;
        println!(
            "Reset {} to {} seed ticket(s)",
            path.display(),
            doc.len()
        );
        return Ok(());
    }

    match JsonFileStore::new(&path).ensure_initialized()? {
        StoreHealth::Valid => println!("Ticket store {} is valid", path.display()),
        StoreHealth::Repaired => println!("Initialized ticket store {}", path.display()),
    }
    Ok(())
}
