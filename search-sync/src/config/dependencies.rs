//! Dependency initialization and wiring for the synchronization core.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::SyncSettings;
use crate::dispatcher::SyncDispatcher;
use crate::errors::SyncError;
use crate::registry::TypeRegistry;
use search_sync_repository::opensearch::IndexConfig;
use search_sync_repository::{IndexClient, OpenSearchProvider};

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection at the configured interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    pub(crate) fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Registry the integrator registers its entity types into.
    pub registry: Arc<TypeRegistry>,
    /// Index client shared with the dispatcher.
    pub client: IndexClient,
    /// Dispatcher the lifecycle hooks call.
    pub dispatcher: SyncDispatcher,
}

impl Dependencies {
    /// Connect to OpenSearch and wire the registry, client and dispatcher.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SyncError)` - If initialization fails (only in fail-fast mode)
    pub async fn new(settings: &SyncSettings) -> Result<Self, SyncError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            connection_mode = ?settings.connection_mode,
            retry_interval_secs = settings.retry_interval.as_secs(),
            index_prefix = ?settings.client_config.index_prefix,
            max_batch_size = ?settings.client_config.max_batch_size,
            start_disabled = settings.start_disabled,
            "Initializing dependencies"
        );

        let provider = Self::connect_to_opensearch(
            &settings.opensearch_url,
            settings.index_config.clone(),
            settings.connection_mode,
            settings.retry_interval,
        )
        .await?;

        info!("OpenSearch connection established");

        let client = IndexClient::with_config(Arc::new(provider), settings.client_config.clone());

        Ok(Self::wire(client, settings.start_disabled))
    }

    /// Wire the core around an existing index client.
    pub fn wire(client: IndexClient, start_disabled: bool) -> Self {
        let registry = Arc::new(if start_disabled {
            TypeRegistry::with_sync_disabled()
        } else {
            TypeRegistry::new()
        });
        let dispatcher = SyncDispatcher::new(Arc::clone(&registry), client.clone());

        Self {
            registry,
            client,
            dispatcher,
        }
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        url: &str,
        index_config: IndexConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, SyncError> {
        loop {
            match OpenSearchProvider::new(url, index_config.clone()).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(SyncError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
