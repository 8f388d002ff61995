//! Window arithmetic
//!
//! Maps a `(page_number, page_size)` request onto the fixed chunk grid the
//! checkpoint cache is keyed by. All positions are absolute record offsets
//! in the store's enumeration order.

use crate::error::{Error, Result};

/// Fixed chunk size of the checkpoint grid, in records
///
/// Checkpoints are only ever recorded at multiples of this offset. Pages
/// larger than one chunk are rejected up front; pages smaller than a chunk
/// are served out of at most two buffered chunks.
pub const CHUNK_SIZE: u64 = 1000;

/// Chunk coordinates of one page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    /// Absolute record position where the window starts (inclusive)
    pub window_start: u64,
    /// Absolute record position where the window ends (exclusive)
    pub window_end: u64,
    /// Chunk-aligned offset of the first chunk overlapping the window
    pub first_chunk_base: u64,
    /// Chunk-aligned offset just past the last chunk overlapping the window
    pub end_boundary: u64,
}

impl WindowPlan {
    /// Plan the window `[page_number * page_size, page_number * page_size + page_size)`
    ///
    /// Fails with a validation error before any network activity when
    /// `page_size` is zero or exceeds [`CHUNK_SIZE`], or when the window
    /// position overflows the addressable range.
    pub fn for_page(page_number: u64, page_size: u64) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::validation("page size must be positive"));
        }
        if page_size > CHUNK_SIZE {
            return Err(Error::validation(format!(
                "page size {page_size} exceeds the maximum of {CHUNK_SIZE}"
            )));
        }

        let overflow = || Error::validation("page window exceeds the addressable record range");
        let window_start = page_number.checked_mul(page_size).ok_or_else(overflow)?;
        let window_end = window_start.checked_add(page_size).ok_or_else(overflow)?;

        let first_chunk_base = (window_start / CHUNK_SIZE) * CHUNK_SIZE;
        let end_boundary = window_end
            .div_ceil(CHUNK_SIZE)
            .checked_mul(CHUNK_SIZE)
            .ok_or_else(overflow)?;

        Ok(Self {
            window_start,
            window_end,
            first_chunk_base,
            end_boundary,
        })
    }

    /// Number of records in the window
    pub fn page_size(&self) -> u64 {
        self.window_end - self.window_start
    }

    /// Number of chunks the window overlaps (1 or 2 for any valid page size)
    pub fn chunk_span(&self) -> u64 {
        (self.end_boundary - self.first_chunk_base) / CHUNK_SIZE
    }

    /// Offset of the window start within the buffered chunks
    pub fn offset_in_buffer(&self) -> usize {
        (self.window_start - self.first_chunk_base) as usize
    }
}
