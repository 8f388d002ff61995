//! Per-table handle

use crate::entity::{validate_key_pair, Entity};
use crate::error::{Error, Result};
use crate::pagination::{CheckpointCache, WindowResolver};
use crate::store::{Continuation, ScanQuery, TableStore};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// Boxed stream of entities produced by a full-table scan
pub type EntityStream = Pin<Box<dyn Stream<Item = Result<Entity>> + Send>>;

/// Handle for one table
///
/// Owns the table's checkpoint cache; build it once and reuse it across page
/// requests so sequential access amortizes to incremental fetches. The handle
/// is safe to share across tasks.
pub struct TableClient {
    store: Arc<dyn TableStore>,
    name: String,
    resolver: WindowResolver,
}

impl TableClient {
    pub(super) fn new(store: Arc<dyn TableStore>, name: impl Into<String>) -> Self {
        let name = name.into();
        let resolver = WindowResolver::new(Arc::clone(&store), name.clone());
        Self {
            store,
            name,
            resolver,
        }
    }

    /// The table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handle's checkpoint cache
    pub fn checkpoints(&self) -> &CheckpointCache {
        self.resolver.cache()
    }

    // ========================================================================
    // Windowed pagination
    // ========================================================================

    /// Fetch page `page_number` of `page_size` records (zero-indexed)
    ///
    /// Returns the slice `[page_number * page_size, page_number * page_size
    /// + page_size)` of the table's enumeration order, short or empty when
    /// the table ends first. `page_size` must be between 1 and
    /// [`CHUNK_SIZE`](crate::pagination::CHUNK_SIZE).
    pub async fn get_page(&self, page_number: u64, page_size: u64) -> Result<Vec<Entity>> {
        self.resolver.get_page(page_number, page_size).await
    }

    /// Blocking form of [`get_page`](Self::get_page)
    ///
    /// Runs the identical algorithm on a private current-thread runtime.
    /// Must not be called from within an async runtime; use `get_page` there.
    pub fn get_page_blocking(&self, page_number: u64, page_size: u64) -> Result<Vec<Entity>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::runtime(format!("failed to start blocking runtime: {e}")))?;
        runtime.block_on(self.get_page(page_number, page_size))
    }

    // ========================================================================
    // Point operations
    // ========================================================================

    /// Insert a new entity
    pub async fn insert(&self, entity: &Entity) -> Result<()> {
        entity.validate_keys()?;
        self.store.insert_entity(&self.name, entity).await
    }

    /// Insert a batch of entities
    ///
    /// Every key pair is validated before the first network call; on a
    /// validation failure nothing is sent.
    pub async fn insert_batch(&self, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            entity.validate_keys()?;
        }
        for entity in entities {
            self.store.insert_entity(&self.name, entity).await?;
        }
        debug!(table = %self.name, count = entities.len(), "batch insert complete");
        Ok(())
    }

    /// Replace an existing entity, honoring its etag when present
    pub async fn update(&self, entity: &Entity) -> Result<()> {
        entity.validate_keys()?;
        self.store.update_entity(&self.name, entity).await
    }

    /// Delete an entity by key pair
    pub async fn delete(&self, partition_key: &str, row_key: &str) -> Result<()> {
        validate_key_pair(partition_key, row_key)?;
        self.store
            .delete_entity(&self.name, partition_key, row_key)
            .await
    }

    /// Fetch a single entity by key pair
    pub async fn get(&self, partition_key: &str, row_key: &str) -> Result<Entity> {
        validate_key_pair(partition_key, row_key)?;
        self.store
            .get_entity(&self.name, partition_key, row_key)
            .await
    }

    // ========================================================================
    // Full scans
    // ========================================================================

    /// Fetch every entity in the table
    ///
    /// Loops the segmented scan to exhaustion with no checkpointing.
    pub async fn get_all(&self) -> Result<Vec<Entity>> {
        self.resolver.scan_to_end().await
    }

    /// Fetch every entity in one partition
    ///
    /// A key-filtered scan to exhaustion, with no checkpointing.
    pub async fn get_partition(&self, partition_key: &str) -> Result<Vec<Entity>> {
        if partition_key.is_empty() {
            return Err(Error::validation("partition key must not be empty"));
        }

        let query = ScanQuery::new().partition(partition_key);
        let mut entities = Vec::new();
        let mut resume: Option<Continuation> = None;
        loop {
            let segment = self
                .store
                .segmented_scan(&self.name, &query, resume.as_ref())
                .await?;
            entities.extend(segment.entities);
            match segment.continuation {
                Some(token) => resume = Some(token),
                None => return Ok(entities),
            }
        }
    }

    /// Count every entity in the table
    ///
    /// The store offers no server-side counting, so this scans to exhaustion.
    pub async fn count(&self) -> Result<usize> {
        let mut total = 0;
        let mut resume: Option<Continuation> = None;
        loop {
            let segment = self
                .store
                .segmented_scan(&self.name, &ScanQuery::new(), resume.as_ref())
                .await?;
            total += segment.entities.len();
            match segment.continuation {
                Some(token) => resume = Some(token),
                None => return Ok(total),
            }
        }
    }

    /// Stream every entity in the table
    ///
    /// Fetches segments lazily as the stream is polled.
    pub fn scan_stream(&self) -> EntityStream {
        let store = Arc::clone(&self.store);
        let table = self.name.clone();

        Box::pin(stream::try_unfold(
            ScanStreamState::default(),
            move |mut state| {
                let store = Arc::clone(&store);
                let table = table.clone();
                async move {
                    loop {
                        if let Some(entity) = state.pending.pop_front() {
                            return Ok(Some((entity, state)));
                        }
                        if state.exhausted {
                            return Ok(None);
                        }
                        let segment = store
                            .segmented_scan(&table, &ScanQuery::new(), state.resume.as_ref())
                            .await?;
                        state.exhausted = segment.continuation.is_none();
                        state.resume = segment.continuation;
                        state.pending.extend(segment.entities);
                    }
                }
            },
        ))
    }
}

impl std::fmt::Debug for TableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClient")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct ScanStreamState {
    pending: VecDeque<Entity>,
    resume: Option<Continuation>,
    exhausted: bool,
}
