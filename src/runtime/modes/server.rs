//! Server mode
//!
//! Loads the store, serves HTTP until a shutdown signal arrives, then drains
//! in-flight requests and writes a final snapshot.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::config::StaticConfig;
use crate::runtime::lifetime;
use crate::storage::FileStore;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
        e
    })?;

    let store = startup.store.clone();
    let bind_address = (config.server.host.clone(), config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .configure(crate::api::configure)
    })
    .shutdown_timeout(config.server.shutdown_timeout)
    .client_request_timeout(Duration::from_millis(5000))
    .disable_signals()
    .bind(&bind_address)?
    .run();

    info!(
        "shorty is running on http://{}:{}",
        bind_address.0, bind_address.1
    );

    let handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let outcome = tokio::select! {
        res = &mut server_task => {
            warn!("HTTP server stopped unexpectedly");
            res
        }
        _ = lifetime::shutdown::wait_for_shutdown_signal() => {
            info!("shutting down...");
            handle.stop(true).await;
            server_task.await
        }
    };

    finish_server(&startup.store, outcome)?;
    info!("bye!");
    Ok(())
}

/// 先落盘，再上报服务器错误
fn finish_server(
    store: &FileStore,
    outcome: std::result::Result<std::io::Result<()>, JoinError>,
) -> Result<()> {
    lifetime::shutdown::persist_on_shutdown(store);
    outcome??;
    Ok(())
}
