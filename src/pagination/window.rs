//! Window resolver
//!
//! Turns a page request into the minimum chunk walk against the store's
//! segmented scan, checkpointing each chunk boundary it crosses.

use super::checkpoint::CheckpointCache;
use super::types::{WindowPlan, CHUNK_SIZE};
use crate::entity::Entity;
use crate::error::Result;
use crate::store::{Continuation, ScanQuery, TableStore};
use std::sync::Arc;
use tracing::debug;

/// Resolves page windows against one table
///
/// Owns the table's checkpoint cache. The resolution algorithm holds no lock
/// across fetches: two concurrent calls for overlapping chunk ranges may each
/// walk (and redundantly re-fetch) the same chunks, but cache writes are
/// insert-if-absent and every returned page is correct.
pub struct WindowResolver {
    store: Arc<dyn TableStore>,
    table: String,
    cache: CheckpointCache,
}

impl WindowResolver {
    /// Create a resolver with a fresh, empty checkpoint cache
    pub fn new(store: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            cache: CheckpointCache::new(),
        }
    }

    /// The table's checkpoint cache
    pub fn cache(&self) -> &CheckpointCache {
        &self.cache
    }

    /// Fetch the page `[page_number * page_size, page_number * page_size + page_size)`
    ///
    /// Walks forward one chunk per segmented fetch, resuming from the nearest
    /// cached checkpoint at or below the window's first chunk. A request past
    /// the end of the table yields a short or empty page, never an error.
    pub async fn get_page(&self, page_number: u64, page_size: u64) -> Result<Vec<Entity>> {
        let plan = WindowPlan::for_page(page_number, page_size)?;

        let (resume_offset, resume_token) = match self
            .cache
            .nearest_at_or_below(plan.first_chunk_base)
            .await
        {
            Some((offset, token)) => (offset, Some(token)),
            None => (0, None),
        };

        debug!(
            table = %self.table,
            page_number,
            page_size,
            window_start = plan.window_start,
            resume_offset,
            "resolving page window"
        );

        let query = ScanQuery::new().take(CHUNK_SIZE as u32);
        let mut offset = resume_offset;
        let mut resume = resume_token;
        let mut buffer: Vec<Entity> = Vec::new();

        while offset < plan.end_boundary {
            let segment = self
                .store
                .segmented_scan(&self.table, &query, resume.as_ref())
                .await?;

            let chunk_base = offset;
            offset += CHUNK_SIZE;

            if chunk_base >= plan.first_chunk_base {
                buffer.extend(segment.entities);
            }

            match segment.continuation {
                Some(token) => {
                    self.cache.insert_absent(offset, token.clone()).await;
                    resume = Some(token);
                }
                // Table exhausted before the walk completed: whatever
                // overlapped the window is already in the buffer.
                None => break,
            }
        }

        Ok(slice_window(buffer, &plan))
    }

    /// Walk the full table from the start, with no checkpointing
    ///
    /// Backs the non-paginated scan surface (`get_all`, `count`).
    pub async fn scan_to_end(&self) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();
        let mut resume: Option<Continuation> = None;
        let query = ScanQuery::new();

        loop {
            let segment = self
                .store
                .segmented_scan(&self.table, &query, resume.as_ref())
                .await?;
            entities.extend(segment.entities);
            match segment.continuation {
                Some(token) => resume = Some(token),
                None => return Ok(entities),
            }
        }
    }
}

impl std::fmt::Debug for WindowResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowResolver")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// Slice the requested window out of the buffered chunk records
fn slice_window(buffer: Vec<Entity>, plan: &WindowPlan) -> Vec<Entity> {
    buffer
        .into_iter()
        .skip(plan.offset_in_buffer())
        .take(plan.page_size() as usize)
        .collect()
}
