//! # spantree CLI Module
//!
//! This module implements the CLI interface for spantree.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP controller surface
//! - `replay` - Feed a link-event file through a fresh controller and show
//!   the resulting topology, forest, redundant set, and port commands
//! - `costs` - Validate and print a TOML cost table

mod commands;

use clap::{Parser, Subcommand};
use spantree_core::SpantreeError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// spantree - Loop-Prevention Controller
///
/// Maintains a live model of the switched topology, computes a deterministic
/// minimum spanning tree, and blocks every link that is not part of it.
#[derive(Parser, Debug)]
#[command(name = "spantree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML file with the initial link cost table
    #[arg(short = 'C', long, global = true)]
    pub costs: Option<PathBuf>,

    /// Persist the default cost into the table on first lookup
    #[arg(long, global = true)]
    pub persist_default: bool,

    /// Deliver "close" as administrative port-down instead of no-flood
    #[arg(long, global = true)]
    pub port_down: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP controller surface
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Replay a link-event file through a fresh controller
    Replay {
        /// Path to the JSON event file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Validate and print a TOML cost table
    Costs,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), SpantreeError> {
    match cli.command {
        Commands::Server { host, port } => {
            cmd_server(
                &host,
                port,
                cli.costs.as_deref(),
                cli.persist_default,
                cli.port_down,
            )
            .await
        }
        Commands::Replay { file } => {
            cmd_replay(&file, cli.costs.as_deref(), cli.persist_default, cli.json_mode)
        }
        Commands::Costs => cmd_costs(cli.costs.as_deref(), cli.json_mode),
    }
}
