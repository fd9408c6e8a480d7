use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;

use lib_common::retrieve::AirtableSource;

mod copy_logic;
use copy_logic::{config, logger, routes, state};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();
    logger::setup_logging(&config.log_dir(), config.log_level())?;

    let base_id = config
        .airtable_base_id
        .clone()
        .context("Airtable base id is not configured (set --airtable-base-id or AIRTABLE_BASE_ID)")?;
    let api_key = config
        .airtable_api_key
        .clone()
        .context("Airtable API key is not configured (set --airtable-api-key or AIRTABLE_API_KEY)")?;
    let source = AirtableSource::new(
        config.airtable_base_url(),
        &base_id,
        config.airtable_table(),
        api_key,
    )?;

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);
    let app_state = state::AppState::new(Arc::new(source));

    // Warm the cache before serving; a failure here is retryable through
    // /copy/refresh, so the server still starts.
    match app_state.refresh().await {
        Ok(snapshot) => log::info!("Initial copy fetch installed {} records", snapshot.len()),
        Err(e) => log::warn!("Initial copy fetch failed: {e}"),
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;
    log::info!("Copy server listening on {}", listener.local_addr()?);

    let server_handle = tokio::spawn(routes::run(
        listener,
        app_state.clone(),
        shutdown_tx.subscribe(),
    ));

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            log::info!("Ctrl-C received, initiating shutdown.");
        }
        _ = async {
            #[cfg(unix)]
            {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut term_signal) => {
                        term_signal.recv().await;
                        log::info!("SIGTERM received, initiating shutdown.");
                    }
                    Err(e) => {
                        log::error!("Failed to install SIGTERM handler: {e}");
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                // On non-unix platforms, just wait forever.
                std::future::pending::<()>().await;
            }
        } => {}
    }

    // Send shutdown signal to all components
    let _ = shutdown_tx.send(());

    // Wait for the server to finish in-flight requests
    match tokio::try_join!(server_handle) {
        Ok((serve_result,)) => {
            if let Err(e) = serve_result {
                log::error!("HTTP server task failed: {e:#}");
            }
        }
        Err(e) => log::error!("HTTP server task panicked: {e}"),
    }

    log::info!("Shutdown complete.");
    Ok(())
}
