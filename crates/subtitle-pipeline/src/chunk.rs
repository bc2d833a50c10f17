//! Bounded-window chunk scheduling with forced forward progress.
//!
//! Every orchestrator walks its input through this cursor algorithm. The
//! scheduler never fails; its one job is the liveness invariant: whatever a
//! downstream consumer proposes as the next cursor, the pipeline advances by
//! at least one item per iteration and therefore terminates in at most N
//! corrective steps.

pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Normalized chunk options carried inside every draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChunkOptions {
    #[serde(rename = "maxItemsPerRequest")]
    pub max_items: usize,
    #[serde(rename = "overlapItems")]
    pub overlap: usize,
}

impl ChunkOptions {
    pub fn new(max_items: usize, overlap: usize) -> Self {
        Self { max_items, overlap }.normalized()
    }

    /// Clamp to sane ranges: `max_items` falls back to the default when
    /// zero, `overlap` is capped at `max_items - 1`.
    pub fn normalized(self) -> Self {
        let max_items = if self.max_items == 0 {
            DEFAULT_MAX_ITEMS
        } else {
            self.max_items
        };
        Self {
            max_items,
            overlap: self.overlap.min(max_items - 1),
        }
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            overlap: 2,
        }
    }
}

/// One window `[start, end)` over the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
    pub is_last: bool,
}

/// Compute the next window for `cursor` over `total` items.
///
/// A tail too short to form a meaningful overlap window is absorbed into
/// the current chunk instead of being emitted as a tiny trailing one.
pub fn next_chunk(total: usize, cursor: usize, options: &ChunkOptions) -> Chunk {
    let options = options.normalized();
    let start = cursor.min(total);
    let tentative_end = (start + options.max_items).min(total);

    if tentative_end == total || total - tentative_end < options.overlap {
        Chunk {
            start,
            end: total,
            is_last: true,
        }
    } else {
        Chunk {
            start,
            end: tentative_end,
            is_last: false,
        }
    }
}

/// Clamp a proposed next cursor to `[0, total]`, forcing at least one item
/// of progress past `previous`.
pub fn advance(previous: usize, proposed: usize, total: usize) -> usize {
    let clamped = proposed.min(total);
    if clamped <= previous {
        (previous + 1).min(total)
    } else {
        clamped
    }
}
