//! ircserv - IRC daemon entry point.
//!
//! `ircserv <port> <password> [config.toml]`

use ircserv::config::{Config, LaunchArgs};
use ircserv::network::Gateway;
use ircserv::state::ServerInfo;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = match LaunchArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let config = match Config::from_launch(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with_target(true)
        .init();

    info!(
        server = %config.server.name,
        port = args.port,
        "Starting ircserv"
    );

    let server_info = ServerInfo {
        name: config.server.name.clone(),
        password: args.password.clone(),
    };
    let gateway = Gateway::bind(config.bind_addr(args.port), server_info, &config.limits)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to bind listener");
            e
        })?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        wait_for_signal().await;
        if shutdown_tx.send(()).is_err() {
            warn!("Gateway already stopped");
        }
    });

    gateway.run(shutdown_rx).await?;
    info!("Shutdown complete");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
        _ = term.recv() => info!("Received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C");
    }
}
