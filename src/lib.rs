//! `helpdesk` - Minimal helpdesk ticketing backend
//!
//! This crate provides the `helpdesk` binary: an HTTP API over a flat JSON
//! ticket store, plus a few maintenance commands.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration (defaults, YAML, env, flags)
//! - [`format`] - Terminal output for `list` and `show`
//! - [`logging`] - tracing subscriber setup
//! - [`server`] - axum router and handlers
//!
//! Storage and ticket operations live in `helpdesk-lib` and are re-exported
//! here as [`model`], [`store`], [`service`] and [`error`].

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod server;

pub use helpdesk_lib::{error, model, query, service, store};
pub use helpdesk_lib::{
    HelpdeskError, JsonFileStore, MemoryStore, NewTicket, Result, StoreHealth, Ticket,
    TicketDocument, TicketService, TicketStore, TicketSummary, TicketUpdate,
};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
