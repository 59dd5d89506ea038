//! Sync dispatcher implementation.
//!
//! The primary store's lifecycle hooks call into the dispatcher after a write
//! commits. The dispatcher checks registration and the sync switch, then
//! projects and upserts the instance or deletes its document. Everything runs
//! inline on the caller's write path; failures are returned, never retried.

use std::sync::Arc;

use search_sync_repository::{
    BatchOperationSummary, DeleteDocumentRequest, IndexClient, SearchIndexError,
    UpsertDocumentRequest,
};
use search_sync_shared::{DestroyedStateSource, SyncOperation};
use tracing::{debug, error, info, instrument, warn};

use crate::entity::Synchronizable;
use crate::errors::SyncError;
use crate::registry::{RegisteredType, TypeRegistry};

/// Why a notification did not reach the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entity type was never registered.
    Unregistered,
    /// Synchronization is disabled for the entity type.
    Disabled,
    /// A `SyncSuspension` covering the entity type is alive.
    Suspended,
}

/// What the dispatcher did for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The projected document was written.
    Upserted,
    /// The document was deleted (or was already absent).
    Deleted,
    /// No index call was made.
    Skipped(SkipReason),
}

/// Dispatches lifecycle notifications to the index client.
///
/// Per instance, the index observes `Unsynced → Synced → Synced (updated) → Removed`.
/// `Removed` is terminal: once an instance reports destroyed, further upsert
/// notifications delete its document instead of writing it back.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use search_sync::{SyncDispatcher, TypeRegistry};
/// use search_sync_repository::{IndexClient, InMemoryProvider};
/// use search_sync_shared::EntityType;
///
/// let registry = Arc::new(TypeRegistry::new());
/// registry.register(EntityType::new("Article"));
///
/// let client = IndexClient::new(Arc::new(InMemoryProvider::new()));
/// let dispatcher = SyncDispatcher::new(registry, client);
/// assert!(dispatcher.registry().is_active_for("Article"));
/// ```
#[derive(Clone)]
pub struct SyncDispatcher {
    registry: Arc<TypeRegistry>,
    client: IndexClient,
}

impl SyncDispatcher {
    pub fn new(registry: Arc<TypeRegistry>, client: IndexClient) -> Self {
        Self { registry, client }
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn client(&self) -> &IndexClient {
        &self.client
    }

    /// Handle a committed create or update.
    ///
    /// Writes the projected document when the type is registered and active. An
    /// instance that already reports destroyed has its document deleted instead.
    #[instrument(skip(self, instance), fields(entity_type = T::TYPE_NAME))]
    pub async fn on_after_upsert<T: Synchronizable>(
        &self,
        instance: &T,
    ) -> Result<SyncOutcome, SyncError> {
        let entry = match self.active_entry::<T>() {
            Ok(entry) => entry,
            Err(reason) => return Ok(SyncOutcome::Skipped(reason)),
        };

        if self.is_destroyed(instance) {
            debug!(identity = %instance.identity(), "Upsert notification for destroyed instance");
            return self.delete(&entry, instance).await;
        }

        self.upsert(&entry, instance).await
    }

    /// Handle a committed (or about to be committed) removal.
    ///
    /// The instance is marked destroyed first, whatever the switch state, then
    /// its document is deleted when the type is registered and active.
    #[instrument(skip(self, instance), fields(entity_type = T::TYPE_NAME))]
    pub async fn on_after_remove<T: Synchronizable>(
        &self,
        instance: &T,
    ) -> Result<SyncOutcome, SyncError> {
        Self::mark_destroyed(instance);

        let entry = match self.active_entry::<T>() {
            Ok(entry) => entry,
            Err(reason) => return Ok(SyncOutcome::Skipped(reason)),
        };

        self.delete(&entry, instance).await
    }

    /// Whether the instance has been removed from the primary store.
    ///
    /// Types registered with native destroyed state are asked directly; the tracker
    /// is only consulted when the native flag is unavailable.
    pub fn is_destroyed<T: Synchronizable>(&self, instance: &T) -> bool {
        let source = self
            .registry
            .get(T::TYPE_NAME)
            .map(|entry| entry.descriptor().destroyed_state)
            .unwrap_or_default();

        let tracked = || {
            instance
                .destroyed_tracker()
                .is_some_and(|tracker| tracker.is_destroyed())
        };

        match source {
            DestroyedStateSource::Native => instance.natively_destroyed().unwrap_or_else(tracked),
            DestroyedStateSource::Tracked => tracked(),
        }
    }

    /// Reconcile a set of instances with the index, e.g. after a suspended bulk import.
    ///
    /// Live instances are re-upserted and destroyed ones deleted, both in batches
    /// of the client's batch limit. Per-document failures are reported in the
    /// summary; a projection failure aborts the remaining batches.
    #[instrument(
        skip(self, instances),
        fields(entity_type = T::TYPE_NAME, count = instances.len())
    )]
    pub async fn reindex<T: Synchronizable>(
        &self,
        instances: &[T],
    ) -> Result<BatchOperationSummary, SyncError> {
        let entry = match self.active_entry::<T>() {
            Ok(entry) => entry,
            Err(reason) => {
                warn!(reason = ?reason, "Skipping reindex");
                return Ok(BatchOperationSummary::empty());
            }
        };

        let (destroyed, live): (Vec<&T>, Vec<&T>) = instances
            .iter()
            .partition(|instance| self.is_destroyed(*instance));
        let chunk_size = self
            .client
            .config()
            .batch_limit()
            .unwrap_or(instances.len())
            .max(1);

        let mut summary = BatchOperationSummary::empty();
        for chunk in live.chunks(chunk_size) {
            let requests = chunk
                .iter()
                .map(|instance| self.upsert_request(&entry, *instance))
                .collect::<Result<Vec<_>, _>>()?;

            let batch = self
                .client
                .batch_upsert(requests)
                .await
                .map_err(|source| {
                    Self::batch_write_error(&entry, SyncOperation::Upsert, source)
                })?;
            summary.merge(Self::log_failures(batch));
        }

        for chunk in destroyed.chunks(chunk_size) {
            let requests = chunk
                .iter()
                .map(|instance| Self::delete_request(&entry, *instance))
                .collect();

            let batch = self
                .client
                .batch_delete(requests)
                .await
                .map_err(|source| {
                    Self::batch_write_error(&entry, SyncOperation::Delete, source)
                })?;
            summary.merge(Self::log_failures(batch));
        }

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            deleted = destroyed.len(),
            "Reindex completed"
        );
        Ok(summary)
    }

    /// Resolve the registry entry for `T` if notifications for it should reach the index.
    fn active_entry<T: Synchronizable>(&self) -> Result<Arc<RegisteredType>, SkipReason> {
        let Some(entry) = self.registry.get(T::TYPE_NAME) else {
            warn!(entity_type = T::TYPE_NAME, "Notification for unregistered entity type");
            return Err(SkipReason::Unregistered);
        };

        if entry.is_disabled() {
            debug!(entity_type = T::TYPE_NAME, "Index sync disabled, skipping");
            return Err(SkipReason::Disabled);
        }

        if entry.is_suspended() {
            debug!(entity_type = T::TYPE_NAME, "Index sync suspended, skipping");
            return Err(SkipReason::Suspended);
        }

        Ok(entry)
    }

    fn mark_destroyed<T: Synchronizable>(instance: &T) {
        if let Some(tracker) = instance.destroyed_tracker() {
            tracker.mark_destroyed();
        }
    }

    fn upsert_request<T: Synchronizable>(
        &self,
        entry: &RegisteredType,
        instance: &T,
    ) -> Result<UpsertDocumentRequest, SyncError> {
        let identity = instance.identity();
        let document = instance.to_document().map_err(|source| {
            error!(identity = %identity, error = %source, "Failed to project entity");
            SyncError::Projection {
                entity_type: entry.name().to_string(),
                identity: identity.clone(),
                source,
            }
        })?;

        Ok(UpsertDocumentRequest {
            index: entry.descriptor().index.clone(),
            document_id: identity,
            document,
        })
    }

    async fn upsert<T: Synchronizable>(
        &self,
        entry: &RegisteredType,
        instance: &T,
    ) -> Result<SyncOutcome, SyncError> {
        let request = self.upsert_request(entry, instance)?;
        let identity = request.document_id.clone();

        self.client.upsert(request).await.map_err(|source| {
            Self::index_write_error(entry, identity.clone(), SyncOperation::Upsert, source)
        })?;

        debug!(identity = %identity, "Document upserted");
        Ok(SyncOutcome::Upserted)
    }

    fn delete_request<T: Synchronizable>(
        entry: &RegisteredType,
        instance: &T,
    ) -> DeleteDocumentRequest {
        DeleteDocumentRequest {
            index: entry.descriptor().index.clone(),
            document_id: instance.identity(),
        }
    }

    async fn delete<T: Synchronizable>(
        &self,
        entry: &RegisteredType,
        instance: &T,
    ) -> Result<SyncOutcome, SyncError> {
        let request = Self::delete_request(entry, instance);
        let identity = request.document_id.clone();

        self.client.delete(request).await.map_err(|source| {
            Self::index_write_error(entry, identity.clone(), SyncOperation::Delete, source)
        })?;

        debug!(identity = %identity, "Document deleted");
        Ok(SyncOutcome::Deleted)
    }

    fn index_write_error(
        entry: &RegisteredType,
        identity: String,
        operation: SyncOperation,
        source: SearchIndexError,
    ) -> SyncError {
        error!(
            identity = %identity,
            operation = %operation,
            error = %source,
            "Index write failed"
        );
        SyncError::IndexWrite {
            entity_type: entry.name().to_string(),
            identity,
            operation,
            source,
        }
    }

    fn batch_write_error(
        entry: &RegisteredType,
        operation: SyncOperation,
        source: SearchIndexError,
    ) -> SyncError {
        error!(operation = %operation, error = %source, "Reindex batch failed");
        SyncError::BatchWrite {
            entity_type: entry.name().to_string(),
            operation,
            source,
        }
    }

    fn log_failures(batch: BatchOperationSummary) -> BatchOperationSummary {
        for failure in batch.failures() {
            warn!(
                document_id = %failure.document_id,
                operation = %failure.operation,
                error = ?failure.error,
                "Failed to reindex document"
            );
        }
        batch
    }
}
