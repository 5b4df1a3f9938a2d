use tokio::signal;
use tracing::{error, info, warn};

use crate::storage::FileStore;

/// Wait for Ctrl+C, or SIGTERM on unix
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}

/// 终止前保存快照
pub fn persist_on_shutdown(store: &FileStore) {
    match store.save() {
        Ok(()) => info!(
            "Saved {} links to {} before exit",
            store.len(),
            store.path().display()
        ),
        Err(e) => error!("save error on shutdown: {}", e),
    }
}
