//! In-process store implementation
//!
//! Keeps every table in a `BTreeMap` keyed by `(partition_key, row_key)`,
//! which gives the stable enumeration order the scan contract requires.
//! The segment size is configurable so tests can exercise continuation
//! handling without thousands of records.

use super::types::{Continuation, ScanQuery, Segment, TableStore};
use crate::entity::Entity;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records per segment when neither the query nor the store bounds it
const DEFAULT_SEGMENT_LIMIT: usize = 1000;

type Rows = BTreeMap<(String, String), Entity>;

/// In-memory table store
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Rows>>>,
    segment_limit: usize,
    etag_counter: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            segment_limit: DEFAULT_SEGMENT_LIMIT,
            etag_counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a store that delivers at most `limit` records per segment
    pub fn with_segment_limit(limit: usize) -> Self {
        Self {
            segment_limit: limit.max(1),
            ..Self::new()
        }
    }

    /// Bulk-seed a table, creating it if absent
    ///
    /// Overwrites existing rows; intended for tests and local development.
    pub async fn load(&self, table: &str, entities: impl IntoIterator<Item = Entity>) {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        for entity in entities {
            let stamped = self.stamp(entity);
            rows.insert(
                (stamped.partition_key.clone(), stamped.row_key.clone()),
                stamped,
            );
        }
    }

    fn stamp(&self, mut entity: Entity) -> Entity {
        let version = self.etag_counter.fetch_add(1, Ordering::Relaxed);
        entity.etag = Some(format!("W/\"{version}\""));
        entity.timestamp = Some(Utc::now());
        entity
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn segmented_scan(
        &self,
        table: &str,
        query: &ScanQuery,
        resume: Option<&Continuation>,
    ) -> Result<Segment> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        let limit = query
            .take
            .map_or(self.segment_limit, |t| (t as usize).min(self.segment_limit))
            .max(1);

        let start = match resume {
            Some(token) => Bound::Included((
                token.next_partition_key().to_string(),
                token.next_row_key().to_string(),
            )),
            None => Bound::Unbounded,
        };

        let mut matched = rows
            .range((start, Bound::Unbounded))
            .map(|(_, entity)| entity)
            .filter(|entity| {
                query
                    .partition_key
                    .as_deref()
                    .map_or(true, |p| entity.partition_key == p)
            });

        let entities: Vec<Entity> = matched.by_ref().take(limit).cloned().collect();
        let continuation = matched
            .next()
            .map(|next| Continuation::new(&next.partition_key, &next.row_key));

        Ok(Segment {
            entities,
            continuation,
        })
    }

    async fn insert_entity(&self, table: &str, entity: &Entity) -> Result<()> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        let key = (entity.partition_key.clone(), entity.row_key.clone());
        if rows.contains_key(&key) {
            return Err(Error::conflict(format!(
                "entity '{}'/'{}' already exists",
                entity.partition_key, entity.row_key
            )));
        }

        rows.insert(key, self.stamp(entity.clone()));
        Ok(())
    }

    async fn update_entity(&self, table: &str, entity: &Entity) -> Result<()> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        let key = (entity.partition_key.clone(), entity.row_key.clone());
        let stored = rows
            .get(&key)
            .ok_or_else(|| Error::entity_not_found(&entity.partition_key, &entity.row_key))?;

        if let Some(ref expected) = entity.etag {
            if stored.etag.as_ref() != Some(expected) {
                return Err(Error::conflict("entity tag did not match stored entity"));
            }
        }

        rows.insert(key, self.stamp(entity.clone()));
        Ok(())
    }

    async fn delete_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        let key = (partition_key.to_string(), row_key.to_string());
        rows.remove(&key)
            .ok_or_else(|| Error::entity_not_found(partition_key, row_key))?;
        Ok(())
    }

    async fn get_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<Entity> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        rows.get(&(partition_key.to_string(), row_key.to_string()))
            .cloned()
            .ok_or_else(|| Error::entity_not_found(partition_key, row_key))
    }

    async fn create_table(&self, table: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return Err(Error::conflict(format!("table '{table}' already exists")));
        }
        tables.insert(table.to_string(), Rows::new());
        Ok(())
    }

    async fn delete_table(&self, table: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .remove(table)
            .ok_or_else(|| Error::table_not_found(table))?;
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.contains_key(table))
    }
}
