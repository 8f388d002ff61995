//! Store boundary types and the collaborator trait

use crate::entity::Entity;
use crate::error::Result;
use async_trait::async_trait;

/// Opaque continuation token issued by the store
///
/// A continuation marks "resume iteration after this point" in the store's
/// enumeration order. Stores construct tokens; the access layer only carries
/// them back verbatim. `Option<Continuation>` is the full resume state:
/// `None` means "start from the beginning" on the way in and "iteration
/// exhausted" on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    next_partition_key: String,
    next_row_key: String,
}

impl Continuation {
    /// Create a continuation token (store implementations only)
    pub fn new(next_partition_key: impl Into<String>, next_row_key: impl Into<String>) -> Self {
        Self {
            next_partition_key: next_partition_key.into(),
            next_row_key: next_row_key.into(),
        }
    }

    /// Partition key of the next record to deliver
    pub fn next_partition_key(&self) -> &str {
        &self.next_partition_key
    }

    /// Row key of the next record to deliver
    pub fn next_row_key(&self) -> &str {
        &self.next_row_key
    }
}

/// Query half of a segmented scan
#[derive(Debug, Clone, Default)]
pub struct ScanQuery {
    /// Restrict the scan to one partition
    pub partition_key: Option<String>,
    /// Upper bound on records per segment (the store may return fewer)
    pub take: Option<u32>,
}

impl ScanQuery {
    /// Create an unrestricted scan query
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the scan to a single partition
    #[must_use]
    pub fn partition(mut self, partition_key: impl Into<String>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    /// Set the per-segment record bound
    #[must_use]
    pub fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }
}

/// Result of one segmented scan call
#[derive(Debug, Clone)]
pub struct Segment {
    /// Records delivered by this segment, in enumeration order
    pub entities: Vec<Entity>,
    /// Token to resume after this segment, or `None` when exhausted
    pub continuation: Option<Continuation>,
}

impl Segment {
    /// Whether the store reported the scan exhausted
    pub fn is_exhausted(&self) -> bool {
        self.continuation.is_none()
    }
}

/// The external storage collaborator
///
/// `segmented_scan` is the single primitive the pagination engine consumes:
/// one bounded network read per call, resuming from an optional continuation.
/// The remaining methods are the adjacent single-call operations of the
/// access layer; none of them participate in window resolution.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Issue exactly one bounded segmented read
    ///
    /// Returns the batch the store chooses to deliver (at most `query.take`
    /// records for the bundled implementations) plus the continuation to
    /// resume after it, or `None` when no further records exist. Transport
    /// failures propagate unchanged; a segment is delivered all-or-nothing.
    async fn segmented_scan(
        &self,
        table: &str,
        query: &ScanQuery,
        resume: Option<&Continuation>,
    ) -> Result<Segment>;

    /// Insert a new entity
    async fn insert_entity(&self, table: &str, entity: &Entity) -> Result<()>;

    /// Replace an existing entity, honoring its etag when present
    async fn update_entity(&self, table: &str, entity: &Entity) -> Result<()>;

    /// Delete an entity by key pair
    async fn delete_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<()>;

    /// Fetch a single entity by key pair
    async fn get_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<Entity>;

    /// Create a table
    async fn create_table(&self, table: &str) -> Result<()>;

    /// Delete a table and all its entities
    async fn delete_table(&self, table: &str) -> Result<()>;

    /// Check whether a table exists
    async fn table_exists(&self, table: &str) -> Result<bool>;
}
