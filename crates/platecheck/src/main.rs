//! platecheck - MOT history and DVLA vehicle lookup proxy
//!
//! Main entry point for the platecheck CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{check, serve, token};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// platecheck - MOT history and DVLA vehicle lookup proxy
#[derive(Parser)]
#[command(name = "platecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (default: ./platecheck.toml if present)
    #[arg(short, long, global = true, env = "PLATECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the proxy server
    Serve(serve::ServeArgs),

    /// Validate configuration and print a redacted summary
    CheckConfig(check::CheckArgs),

    /// Acquire an MOT bearer token once to verify the OAuth credentials
    Token(token::TokenArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    let ctx = commands::Context {
        config_path: cli.config,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Serve(args) => serve::run(args, &ctx).await,
        Commands::CheckConfig(args) => check::run(args, &ctx).await,
        Commands::Token(args) => token::run(args, &ctx).await,
    }
}

/// Console logging. `RUST_LOG` overrides the built-in filter.
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let default_filter = if verbose {
        "platecheck=debug,platecheck_server=debug,platecheck_oauth=debug,platecheck_config=debug,tower_http=debug,info"
    } else {
        "platecheck=info,platecheck_server=info,platecheck_oauth=info,platecheck_config=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
