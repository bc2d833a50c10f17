//! External capability contracts.
//!
//! The text-generation service behind correction and translation is an
//! opaque boundary: these traits are all the pipeline knows about it.
//! Implementations decide transport, prompting and batching.

use std::future::Future;
use std::pin::Pin;

use subtitle::Paragraph;

pub type CapabilityError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Punctuation/paragraphing correction over a bounded slice of text.
///
/// The returned text is free-form: word boundaries may move, fillers may be
/// dropped, and paragraph breaks are signaled by a newline character. A
/// failing capability must return `Err`; it must never silently substitute
/// corrected text.
///
/// # Object safety
///
/// The trait is object-safe via the explicit `BoxFuture` return type. Use
/// `dyn CorrectionCapability` when you need dynamic dispatch.
pub trait CorrectionCapability: Send + Sync {
    fn correct_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, CapabilityError>>;
}

/// Per-segment translation result, keyed by the owning paragraph.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTranslationResult {
    pub paragraph_id: String,
    pub segments: Vec<TranslatedSegment>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedSegment {
    pub id: String,
    pub translation: String,
}

/// Bulk translation at paragraph and segment granularity.
///
/// Results may cover a subset of the pending items (partial failure) or a
/// superset (echoed context); the orchestrators merge by id and leave
/// anything unresolved pending for a later pass.
pub trait TranslationCapability: Send + Sync {
    fn translate_paragraphs<'a>(
        &'a self,
        pending: &'a [Paragraph],
        context: &'a [Paragraph],
    ) -> BoxFuture<'a, Result<Vec<Paragraph>, CapabilityError>>;

    fn translate_segments<'a>(
        &'a self,
        pending: &'a [Paragraph],
        context: &'a [Paragraph],
    ) -> BoxFuture<'a, Result<Vec<SegmentTranslationResult>, CapabilityError>>;
}

/// Awaited after every chunk with the full mutated draft, before the next
/// chunk starts. This is the persistence hook: a caller that writes the
/// draft to stable storage here can resume from the stored cursors after a
/// crash.
pub trait ProgressSink<D>: Send {
    fn on_progress<'a>(&'a mut self, draft: &'a D) -> BoxFuture<'a, ()>;
}

/// Sink that does nothing; for callers that poll the draft afterwards.
pub struct NoProgress;

impl<D> ProgressSink<D> for NoProgress {
    fn on_progress<'a>(&'a mut self, _draft: &'a D) -> BoxFuture<'a, ()> {
        Box::pin(async {})
    }
}
