//! REST/JSON store implementation
//!
//! Speaks a plain JSON protocol against the store endpoint:
//!
//! - `GET  /{table}/entities` - segmented scan; continuation round-trips via
//!   the `x-continuation-next-partition-key` / `x-continuation-next-row-key`
//!   response headers and the matching `nextPartitionKey` / `nextRowKey`
//!   query parameters
//! - `POST /{table}/entities` - insert
//! - `GET/PUT/DELETE /{table}/entity?partitionKey=..&rowKey=..` - point ops
//! - `POST /tables`, `GET/DELETE /tables/{name}` - table lifecycle
//!
//! Retries and rate limiting are handled by the underlying `HttpClient`;
//! this layer only maps statuses onto the crate error variants.

use super::types::{Continuation, ScanQuery, Segment, TableStore};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const HEADER_NEXT_PARTITION: &str = "x-continuation-next-partition-key";
const HEADER_NEXT_ROW: &str = "x-continuation-next-row-key";

const PARAM_NEXT_PARTITION: &str = "nextPartitionKey";
const PARAM_NEXT_ROW: &str = "nextRowKey";

/// Wire shape of a scan response body
#[derive(Debug, Deserialize)]
struct ScanResponse {
    value: Vec<Entity>,
}

/// Wire shape of a table lifecycle request
#[derive(Debug, serde::Serialize)]
struct TableBody<'a> {
    name: &'a str,
}

/// HTTP-backed table store
#[derive(Debug)]
pub struct RestStore {
    http: HttpClient,
}

impl RestStore {
    /// Create a store over a configured HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn scan_request(query: &ScanQuery, resume: Option<&Continuation>) -> RequestConfig {
        let mut config = RequestConfig::new();
        if let Some(take) = query.take {
            config = config.query("take", take.to_string());
        }
        if let Some(ref partition_key) = query.partition_key {
            config = config.query("partitionKey", partition_key.clone());
        }
        if let Some(token) = resume {
            config = config
                .query(PARAM_NEXT_PARTITION, token.next_partition_key())
                .query(PARAM_NEXT_ROW, token.next_row_key());
        }
        config
    }

    fn entity_request(partition_key: &str, row_key: &str) -> RequestConfig {
        RequestConfig::new()
            .query("partitionKey", partition_key)
            .query("rowKey", row_key)
    }
}

#[async_trait]
impl TableStore for RestStore {
    async fn segmented_scan(
        &self,
        table: &str,
        query: &ScanQuery,
        resume: Option<&Continuation>,
    ) -> Result<Segment> {
        let path = format!("/{table}/entities");
        let response = self
            .http
            .get(&path, Self::scan_request(query, resume))
            .await
            .map_err(|e| not_found_as_table(e, table))?;

        let continuation = match (
            header_value(&response, HEADER_NEXT_PARTITION),
            header_value(&response, HEADER_NEXT_ROW),
        ) {
            (Some(partition), Some(row)) => Some(Continuation::new(partition, row)),
            _ => None,
        };

        let body: ScanResponse = response.json().await.map_err(Error::Http)?;
        debug!(
            table,
            delivered = body.value.len(),
            exhausted = continuation.is_none(),
            "segmented scan"
        );

        Ok(Segment {
            entities: body.value,
            continuation,
        })
    }

    async fn insert_entity(&self, table: &str, entity: &Entity) -> Result<()> {
        let path = format!("/{table}/entities");
        let body = serde_json::to_value(entity)?;
        self.http
            .post(&path, RequestConfig::new().json(body))
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status: 404, .. } => Error::table_not_found(table),
                Error::HttpStatus { status: 409, .. } => Error::conflict(format!(
                    "entity '{}'/'{}' already exists",
                    entity.partition_key, entity.row_key
                )),
                other => other,
            })?;
        Ok(())
    }

    async fn update_entity(&self, table: &str, entity: &Entity) -> Result<()> {
        let path = format!("/{table}/entity");
        let mut config = Self::entity_request(&entity.partition_key, &entity.row_key)
            .json(serde_json::to_value(entity)?);
        config = match entity.etag {
            Some(ref etag) => config.if_match(etag.clone()),
            None => config.if_match("*"),
        };

        self.http.put(&path, config).await.map_err(|e| match e {
            Error::HttpStatus { status: 404, .. } => {
                Error::entity_not_found(&entity.partition_key, &entity.row_key)
            }
            Error::HttpStatus { status: 412, .. } => {
                Error::conflict("entity tag did not match stored entity")
            }
            other => other,
        })?;
        Ok(())
    }

    async fn delete_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<()> {
        let path = format!("/{table}/entity");
        self.http
            .delete(&path, Self::entity_request(partition_key, row_key))
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status: 404, .. } => {
                    Error::entity_not_found(partition_key, row_key)
                }
                other => other,
            })?;
        Ok(())
    }

    async fn get_entity(&self, table: &str, partition_key: &str, row_key: &str) -> Result<Entity> {
        let path = format!("/{table}/entity");
        let response = self
            .http
            .get(&path, Self::entity_request(partition_key, row_key))
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status: 404, .. } => {
                    Error::entity_not_found(partition_key, row_key)
                }
                other => other,
            })?;

        let entity: Entity = response.json().await.map_err(Error::Http)?;
        Ok(entity)
    }

    async fn create_table(&self, table: &str) -> Result<()> {
        let body = serde_json::to_value(TableBody { name: table })?;
        self.http
            .post("/tables", RequestConfig::new().json(body))
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status: 409, .. } => {
                    Error::conflict(format!("table '{table}' already exists"))
                }
                other => other,
            })?;
        Ok(())
    }

    async fn delete_table(&self, table: &str) -> Result<()> {
        let path = format!("/tables/{table}");
        self.http
            .delete(&path, RequestConfig::new())
            .await
            .map_err(|e| not_found_as_table(e, table))?;
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        let path = format!("/tables/{table}");
        match self.http.get(&path, RequestConfig::new()).await {
            Ok(_) => Ok(true),
            Err(Error::HttpStatus { status: 404, .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn not_found_as_table(error: Error, table: &str) -> Error {
    match error {
        Error::HttpStatus { status: 404, .. } => Error::table_not_found(table),
        other => other,
    }
}
