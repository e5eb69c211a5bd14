//! Serve command implementation.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::server;

/// Execute the serve command on a fresh multi-threaded runtime.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or the server fails.
pub fn execute(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(server::serve(config))
}
