//! # spantree - Loop-Prevention Controller
//!
//! The main binary for the spantree centralized loop-prevention controller.
//!
//! This application provides:
//! - HTTP server for configuration, introspection, and link events (axum)
//! - CLI interface with an offline replay mode
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                   apps/spantree (THE BINARY)                   │
//! │                                                                │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐  │
//! │  │   CLI       │    │   HTTP API  │    │  Port sink       │  │
//! │  │  (clap)     │    │   (axum)    │    │  (log delivery)  │  │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘  │
//! │         │                  │                    │             │
//! │         └──────────────────┼────────────────────┘             │
//! │                            ▼                                  │
//! │                   ┌─────────────────┐                         │
//! │                   │  spantree-core  │                         │
//! │                   │  (THE ENGINE)   │                         │
//! │                   └─────────────────┘                         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP controller surface
//! spantree server --host 0.0.0.0 --port 8080 --costs costs.toml
//!
//! # Offline what-if analysis
//! spantree replay --file events.json --costs costs.toml
//! spantree costs --file costs.toml
//! ```

use clap::Parser;
use spantree::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SPANTREE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SPANTREE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spantree=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the spantree startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗██████╗  █████╗ ███╗   ██╗████████╗██████╗ ███████╗███████╗
  ██╔════╝██╔══██╗██╔══██╗████╗  ██║╚══██╔══╝██╔══██╗██╔════╝██╔════╝
  ███████╗██████╔╝███████║██╔██╗ ██║   ██║   ██████╔╝█████╗  █████╗
  ╚════██║██╔═══╝ ██╔══██║██║╚██╗██║   ██║   ██╔══██╗██╔══╝  ██╔══╝
  ███████║██║     ██║  ██║██║ ╚████║   ██║   ██║  ██║███████╗███████╗
  ╚══════╝╚═╝     ╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝╚══════╝╚══════╝

  Loop-Prevention Controller v{}

  One topology • One tree • No flaps
"#,
        env!("CARGO_PKG_VERSION")
    );
}
