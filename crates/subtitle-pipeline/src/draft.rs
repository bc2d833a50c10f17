//! Resumable draft records.
//!
//! A draft is created once by the caller, mutated in place by exactly one
//! running orchestrator call, and handed to the progress sink after every
//! chunk. Persisting it there (JSON round-trip) is what makes a crashed or
//! aborted run resumable: re-invoking the orchestrator with a stored draft
//! continues from the stored cursors instead of restarting.

use subtitle::{Paragraph, Segment};

use crate::chunk::ChunkOptions;
use crate::polish::speaker_groups;

/// State of one paragraph-construction run over a set of segments.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishDraft {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    pub options: ChunkOptions,
    #[serde(default)]
    pub last_processed_group_index: usize,
    #[serde(default)]
    pub last_processed_word_index: usize,
}

impl PolishDraft {
    pub fn new(segments: Vec<Segment>, options: ChunkOptions) -> Self {
        Self {
            segments,
            paragraphs: Vec::new(),
            options: options.normalized(),
            last_processed_group_index: 0,
            last_processed_word_index: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.last_processed_group_index >= speaker_groups(&self.segments).len()
    }
}

/// State of one translation run over a list of paragraphs.
///
/// Used by both the paragraph-level and the segment-level orchestrator;
/// each stage owns its own draft, the cursor is not shared between stages.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateDraft {
    pub paragraphs: Vec<Paragraph>,
    pub options: ChunkOptions,
    /// `None` means "resume from the first pending item".
    #[serde(default)]
    pub last_processed_paragraph_index: Option<usize>,
}

impl TranslateDraft {
    pub fn new(paragraphs: Vec<Paragraph>, options: ChunkOptions) -> Self {
        Self {
            paragraphs,
            options: options.normalized(),
            last_processed_paragraph_index: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.last_processed_paragraph_index
            .is_some_and(|c| c >= self.paragraphs.len())
    }
}
