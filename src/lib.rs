//! # Tablewise
//!
//! A Rust-native client for remote, partition/row-keyed table stores that
//! only expose forward-only, continuation-token iteration. Tablewise turns
//! arbitrary `(page_number, page_size)` requests into the minimum sequence
//! of segmented fetches, checkpointing continuation tokens at fixed chunk
//! boundaries so sequential or repeated page access never replays the scan
//! from the beginning.
//!
//! ## Features
//!
//! - **Windowed Pagination**: random page access over a cursor-only store
//! - **Checkpoint Cache**: per-handle, concurrency-safe, purely additive
//! - **CRUD Pass-Throughs**: point reads, inserts, updates, deletes
//! - **Full Scans**: collect, count, or stream a table to exhaustion
//! - **Robust Transport**: retries, backoff, and rate limiting via reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tablewise::{AuthConfig, TableService, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = TableService::builder()
//!         .endpoint("https://tables.example.com")
//!         .auth(AuthConfig::api_key_header("x-api-key", "secret"))
//!         .build()?;
//!
//!     let events = service.table("events");
//!
//!     // Page 4 of 500 records: [2000, 2500) in enumeration order
//!     let page = events.get_page(4, 500).await?;
//!
//!     // Later pages resume from cached checkpoints instead of rescanning
//!     let next = events.get_page(5, 500).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        TableService / TableClient               │
//! │  get_page(n, size)    insert/update/delete/get    get_all/count │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────┬───────────────┴───────────────┬─────────────────┐
//! │  WindowPlan   │        WindowResolver         │ CheckpointCache │
//! │  chunk math   │  backfill walk + page slice   │ offset → token  │
//! └───────────────┴───────────────┬───────────────┴─────────────────┘
//!                                 │ segmented_scan
//! ┌───────────────────────────────┴─────────────────────────────────┐
//! │                TableStore (RestStore | MemoryStore)             │
//! │        one bounded fetch per call, continuation or done         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Entity model
pub mod entity;

/// Request authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Storage collaborator boundary
pub mod store;

/// Windowed pagination engine
pub mod pagination;

/// Public table handles
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::AuthConfig;
pub use entity::Entity;
pub use error::{Error, Result};
pub use pagination::{CheckpointCache, CHUNK_SIZE};
pub use store::{Continuation, MemoryStore, RestStore, ScanQuery, Segment, TableStore};
pub use table::{EntityStream, TableClient, TableService};
pub use types::BackoffType;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
