//! Watch command - the long-running upload loop.

use anyhow::Context;

use crate::config::Settings;
use crate::upload::Uploader;
use crate::watcher;

/// Watch `local_path` until interrupted.
pub async fn run_watch(settings: Settings) -> anyhow::Result<()> {
    for warning in settings.warnings() {
        tracing::warn!("[config] {warning}");
    }

    crate::log_event!(
        "watcher",
        "uploading to",
        "{}@{}:{}",
        settings.username,
        settings.remote_address(),
        settings.remote_path
    );

    let uploader = Uploader::system(settings);
    let uploaded = watcher::run(uploader, shutdown_signal())
        .await
        .context("watcher stopped")?;

    crate::log_event!("watcher", "stopped", "{uploaded} files uploaded");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[watcher] cannot listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("[watcher] cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    crate::log_event!("watcher", "received shutdown signal");
}
