//! Resumable orchestration of subtitle correction and translation.
//!
//! Everything here drives the pure text machinery of the `subtitle` crate
//! against an external text-generation capability, in bounded overlapping
//! windows with persisted cursors so that long transcripts survive crashes
//! and partial failures.

mod capability;
mod chunk;
mod draft;
mod error;
mod polish;
mod translate;

pub use capability::{
    BoxFuture, CapabilityError, CorrectionCapability, NoProgress, ProgressSink,
    SegmentTranslationResult, TranslatedSegment, TranslationCapability,
};
pub use chunk::{Chunk, ChunkOptions, DEFAULT_MAX_ITEMS, advance, next_chunk};
pub use draft::{PolishDraft, TranslateDraft};
pub use error::{Error, Result};
pub use polish::polish_words;
pub use translate::{translate_paragraphs, translate_segments};
