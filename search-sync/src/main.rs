//! Search Sync bootstrap entry point.
//!
//! Connects to OpenSearch and makes sure every index listed in
//! `SEARCH_SYNC_INDICES` exists before application processes start writing
//! documents through their lifecycle hooks.

use dotenv::dotenv;
use search_sync::{Dependencies, SyncError, SyncSettings};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_sync=info,search_sync_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "search-sync",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), SyncError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let settings = SyncSettings::from_env();
    if settings.indices.is_empty() {
        info!("SEARCH_SYNC_INDICES is empty, nothing to bootstrap");
        return Ok(());
    }

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    for index in &settings.indices {
        if let Err(e) = deps.client.ensure_index(index).await {
            error!(index = %index, error = %e, "Failed to ensure index exists");
            return Err(SyncError::config(format!(
                "Failed to ensure index '{}' exists: {}",
                index, e
            )));
        }
        info!(index = %index, "Index ready");
    }

    info!(count = settings.indices.len(), "Search index bootstrap completed");
    Ok(())
}
