//! Windowed pagination engine
//!
//! The remote store only supports forward-only segmented iteration, so an
//! arbitrary `(page_number, page_size)` request has to be translated into a
//! walk over fixed-size chunks of the enumeration. The engine checkpoints
//! the continuation token at every chunk boundary it crosses, so sequential
//! or repeated page requests resume incrementally instead of replaying the
//! scan from the start.
//!
//! # Overview
//!
//! - `WindowPlan` - pure arithmetic from a page request to chunk coordinates
//! - `CheckpointCache` - per-table-handle map of chunk offset to continuation
//! - `WindowResolver` - drives the segment walk and slices out the page
//!
//! Caching affects fetch counts only, never output: a page served from a
//! cold cache and a warm cache is identical.

mod checkpoint;
mod types;
mod window;

pub use checkpoint::CheckpointCache;
pub use types::{WindowPlan, CHUNK_SIZE};
pub use window::WindowResolver;
