use std::future::{Future, pending};

use blockres_api::{ResourceServer, ServerEvent};
use blockres_telemetry::GlobalContextGuard;
use clap::Parser;
use tracing::{error, info, warn};

use crate::cli::ServerArgs;
use crate::error::{AppError, AppResult};

/// Entry point for the resource server boot sequence.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the server fails to start.
pub async fn run_app() -> AppResult<()> {
    let args = ServerArgs::parse();
    blockres_telemetry::init_logging(&args.logging())
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new("bootstrap");

    info!("resource server bootstrap starting");
    serve(&args, shutdown_signal()).await
}

/// Build the index, listen, and serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`AppError::InvalidConfig`] for an unusable user data path and
/// [`AppError::Server`] when construction, binding, or serving fails.
pub async fn serve<F>(args: &ServerArgs, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send,
{
    args.validate()?;
    let server = ResourceServer::new(args.user_data.clone())
        .map_err(|err| AppError::server("server.new", err))?
        .with_bind_ip(args.bind);

    info!(addr = %args.listen_addr(), "launching resource listener");
    let outcome = server.listen(Some(args.port)).await;
    match ServerEvent::from_listen(&outcome) {
        ServerEvent::Ready { addr } => info!(addr = %addr, "resource server ready"),
        ServerEvent::Error { message } => error!(%message, "resource server failed to start"),
    }
    let running = outcome.map_err(|err| AppError::server("server.listen", err))?;

    running
        .serve_until(shutdown)
        .await
        .map_err(|err| AppError::server("server.serve", err))?;
    info!("resource server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler unavailable; serving until the process is killed");
        pending::<()>().await;
    }
}
