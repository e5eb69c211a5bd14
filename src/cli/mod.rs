//! Command-line interface for `helpdesk`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{Config, ConfigOverrides};
use crate::logging;

/// `helpdesk` - Minimal helpdesk ticketing backend.
#[derive(Parser, Debug)]
#[command(name = "helpdesk")]
#[command(
    author,
    version,
    about = "Helpdesk ticket API backed by a single JSON file",
    long_about = None,
    after_help = "Runs `serve` when no command is given."
)]
pub struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// YAML config file (default: ./helpdesk.yaml if present)
    #[arg(long, global = true, env = "HELPDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ticket store JSON file
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),

    /// Create or repair the ticket store
    Init(InitArgs),

    /// List tickets (without descriptions)
    List(OutputArgs),

    /// Show one ticket
    Show(ShowArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Reset to seed tickets even if the store is valid
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket ID
    pub id: String,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Parse arguments, set up logging and configuration, and dispatch.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json);

    let mut config = Config::load(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));

    let (host, port) = match &command {
        Commands::Serve(args) => (args.host.clone(), args.port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        host,
        port,
        data_file: cli.data_file,
    });

    match command {
        Commands::Serve(_) => commands::serve::execute(config),
        Commands::Init(args) => commands::init::execute(&config, args.force),
        Commands::List(args) => commands::list::execute(&config, args.json),
        Commands::Show(args) => commands::show::execute(&config, &args.id, args.json),
    }
}
