//! Serve command - runs the proxy server.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Args;
use tracing::info;

use platecheck_server::{AppState, Server};

use super::Context;

/// Arguments for the serve command.
///
/// CLI arguments override config file and environment values.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Validate plates on the DVLA route too (overrides config)
    #[arg(long)]
    pub validate_dvla: bool,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut resolved = ctx.load_config()?;

    if let Some(bind) = args.bind {
        resolved.bind_address = bind;
    }
    if args.validate_dvla {
        resolved.validate_dvla_plates = true;
    }

    info!(
        bind = %resolved.bind_address,
        mot = %resolved.endpoints.mot_base_url,
        dvla = %resolved.endpoints.dvla_base_url,
        validate_dvla_plates = resolved.validate_dvla_plates,
        "Configuration loaded"
    );

    let state = AppState::from_config(&resolved)?;
    Server::new(state).run_until(shutdown_signal()).await?;
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
