//! Command implementations.

pub mod init;
pub mod list;
pub mod serve;
pub mod show;

use crate::config::Config;
use crate::{JsonFileStore, TicketService};

/// Open the configured store behind a service.
pub(crate) fn open_service(config: &Config) -> TicketService<JsonFileStore> {
    TicketService::new(JsonFileStore::new(config.resolved_data_file()))
}
