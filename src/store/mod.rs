//! Storage collaborator boundary
//!
//! The remote store exposes exactly one scan primitive: forward-only
//! segmented iteration driven by an opaque continuation token. Everything
//! else on the trait is a single-call pass-through (point CRUD and table
//! lifecycle).
//!
//! # Overview
//!
//! - `TableStore` - the collaborator trait the access layer consumes
//! - `Continuation` - opaque resume token issued by the store
//! - `ScanQuery` / `Segment` - the two halves of `segmented_scan`
//! - `RestStore` - HTTP implementation over a REST/JSON protocol
//! - `MemoryStore` - in-process implementation for tests and local use

mod memory;
mod rest;
mod types;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use types::{Continuation, ScanQuery, Segment, TableStore};
