use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::errors::ShortyError;
use crate::storage::FileStore;

pub struct StartupContext {
    pub store: Arc<FileStore>,
}

/// Build the store and pick up the existing snapshot, if any.
///
/// A missing snapshot means a fresh start; the file is created on the first
/// save. An unreadable or malformed snapshot aborts startup so that the next
/// save does not overwrite it.
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = FileStore::new(&config.storage.path)
        .and_then(|store| store.with_code_length(config.storage.code_length))
        .context("Failed to create store")?;

    match store.load() {
        Ok(()) => {}
        Err(ShortyError::SnapshotNotFound(msg)) => {
            warn!("No initial snapshot found ({}), will create on save", msg);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to load snapshot {}", store.path().display())
            });
        }
    }

    info!(
        "Store ready with {} links from {} ({:?})",
        store.len(),
        store.path().display(),
        start_time.elapsed()
    );

    Ok(StartupContext {
        store: Arc::new(store),
    })
}
