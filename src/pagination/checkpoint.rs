//! Checkpoint cache
//!
//! Maps cumulative record offsets (multiples of [`CHUNK_SIZE`]) to the
//! continuation token that resumes the scan at that offset. One cache per
//! table handle, created empty and torn down with it. The cache is purely
//! additive: entries are inserted at most once per offset and never evicted
//! or invalidated, so it grows with the number of distinct chunk boundaries
//! ever visited.
//!
//! Concurrent `get_page` calls may race to populate the same offset; the
//! insert is atomic per key and the first writer wins, which is safe because
//! any token recorded for an offset resumes at the same record position.
//!
//! [`CHUNK_SIZE`]: super::CHUNK_SIZE

use crate::store::Continuation;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-handle map of chunk offset to resume token
#[derive(Debug, Clone, Default)]
pub struct CheckpointCache {
    inner: Arc<RwLock<BTreeMap<u64, Continuation>>>,
}

impl CheckpointCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the token that resumes at `offset`, unless one is already known
    ///
    /// Returns whether this call inserted the entry.
    pub async fn insert_absent(&self, offset: u64, token: Continuation) -> bool {
        let mut map = self.inner.write().await;
        match map.entry(offset) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(token);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Look up the exact checkpoint for `offset`
    pub async fn get(&self, offset: u64) -> Option<Continuation> {
        self.inner.read().await.get(&offset).cloned()
    }

    /// Find the closest checkpoint at or below `offset`
    ///
    /// This is the resume point for a backfill: the walk starts there and
    /// only replays the chunks between it and the target window.
    pub async fn nearest_at_or_below(&self, offset: u64) -> Option<(u64, Continuation)> {
        self.inner
            .read()
            .await
            .range(..=offset)
            .next_back()
            .map(|(o, token)| (*o, token.clone()))
    }

    /// Number of checkpoints recorded so far
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no checkpoint has been recorded yet
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
