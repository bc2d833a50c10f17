//! # Translation orchestration
//!
//! Walks an existing paragraph list through the bulk-translation capability
//! in bounded windows, at paragraph granularity and then optionally at
//! sentence-segment granularity.
//!
//! Unlike paragraph construction, translation never rewinds: the cursor
//! moves to the window end no matter how many items the capability actually
//! resolved. Unresolved items simply stay pending and are picked up by the
//! pending scan of a later invocation. Capability errors are logged and
//! tolerated for the same reason; every item is retryable in isolation.

use std::collections::HashMap;

use subtitle::Paragraph;

use crate::capability::{ProgressSink, TranslationCapability};
use crate::chunk::next_chunk;
use crate::draft::TranslateDraft;
use crate::error::{Error, Result};

fn needs_translation(translation: Option<&str>) -> bool {
    translation.is_none_or(|t| t.trim().is_empty())
}

fn paragraph_pending(paragraph: &Paragraph) -> bool {
    needs_translation(paragraph.translation.as_deref())
}

fn has_pending_segments(paragraph: &Paragraph) -> bool {
    paragraph
        .segments
        .as_ref()
        .is_some_and(|segments| {
            segments
                .iter()
                .any(|s| needs_translation(s.translation.as_deref()))
        })
}

fn first_pending(paragraphs: &[Paragraph], pending: impl Fn(&Paragraph) -> bool) -> usize {
    paragraphs
        .iter()
        .position(pending)
        .unwrap_or(paragraphs.len())
}

/// Up to `overlap` already-translated items immediately preceding the
/// window, in document order. Empty at the start of the sequence.
fn context_window(
    preceding: &[Paragraph],
    overlap: usize,
    translated: impl Fn(&Paragraph) -> bool,
) -> Vec<Paragraph> {
    let mut context: Vec<Paragraph> = preceding
        .iter()
        .rev()
        .filter(|p| translated(p))
        .take(overlap)
        .cloned()
        .collect();
    context.reverse();
    context
}

/// Translate every pending paragraph in the draft, resuming from its cursor.
///
/// Partially resolved or failed windows are not retried within this call;
/// the unresolved items remain pending for a later invocation with a fresh
/// draft over the same paragraphs.
pub async fn translate_paragraphs(
    draft: &mut TranslateDraft,
    translation: &dyn TranslationCapability,
    progress: &mut dyn ProgressSink<TranslateDraft>,
) -> Result<()> {
    let options = draft.options.normalized();
    let total = draft.paragraphs.len();

    let mut cursor = match draft.last_processed_paragraph_index {
        Some(cursor) => cursor,
        None => first_pending(&draft.paragraphs, paragraph_pending),
    };
    draft.last_processed_paragraph_index = Some(cursor);

    while cursor < total {
        let chunk = next_chunk(total, cursor, &options);
        let pending: Vec<Paragraph> = draft.paragraphs[chunk.start..chunk.end]
            .iter()
            .filter(|p| paragraph_pending(p))
            .cloned()
            .collect();

        if !pending.is_empty() {
            let context = context_window(&draft.paragraphs[..chunk.start], options.overlap, |p| {
                !paragraph_pending(p)
            });
            tracing::debug!(
                "translating {} paragraphs in {}..{} with {} context items",
                pending.len(),
                chunk.start,
                chunk.end,
                context.len()
            );

            match translation.translate_paragraphs(&pending, &context).await {
                Ok(results) => {
                    let by_id: HashMap<&str, &str> = results
                        .iter()
                        .filter_map(|p| {
                            p.translation
                                .as_deref()
                                .filter(|t| !t.trim().is_empty())
                                .map(|t| (p.id.as_str(), t))
                        })
                        .collect();

                    for paragraph in &mut draft.paragraphs[chunk.start..chunk.end] {
                        if paragraph_pending(paragraph) {
                            if let Some(translated) = by_id.get(paragraph.id.as_str()) {
                                paragraph.translation = Some((*translated).to_string());
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        "paragraph translation failed for {}..{}, items stay pending: {error}",
                        chunk.start,
                        chunk.end
                    );
                }
            }
        }

        cursor = chunk.end;
        draft.last_processed_paragraph_index = Some(cursor);
        progress.on_progress(draft).await;
    }

    Ok(())
}

/// Translate every pending sentence segment across the draft's paragraphs.
///
/// Requires the paragraph-level pass to have completed first; a single
/// untranslated segment whose parent paragraph carries a translation adopts
/// it verbatim instead of going through the capability.
pub async fn translate_segments(
    draft: &mut TranslateDraft,
    translation: &dyn TranslationCapability,
    progress: &mut dyn ProgressSink<TranslateDraft>,
) -> Result<()> {
    if draft.paragraphs.iter().any(paragraph_pending) {
        return Err(Error::ParagraphsNotTranslated);
    }

    for paragraph in &mut draft.paragraphs {
        if let Some(segments) = &mut paragraph.segments {
            if segments.len() == 1 && needs_translation(segments[0].translation.as_deref()) {
                if let Some(adopted) = paragraph
                    .translation
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                {
                    segments[0].translation = Some(adopted.to_string());
                }
            }
        }
    }

    let options = draft.options.normalized();
    let total = draft.paragraphs.len();

    let mut cursor = match draft.last_processed_paragraph_index {
        Some(cursor) => cursor,
        None => first_pending(&draft.paragraphs, has_pending_segments),
    };
    draft.last_processed_paragraph_index = Some(cursor);

    while cursor < total {
        let chunk = next_chunk(total, cursor, &options);
        // Strip already-translated segments so the capability only sees
        // work that is actually pending.
        let pending: Vec<Paragraph> = draft.paragraphs[chunk.start..chunk.end]
            .iter()
            .filter(|p| has_pending_segments(p))
            .map(|p| {
                let mut sanitized = p.clone();
                if let Some(segments) = &mut sanitized.segments {
                    segments.retain(|s| needs_translation(s.translation.as_deref()));
                }
                sanitized
            })
            .collect();

        if !pending.is_empty() {
            let context = context_window(&draft.paragraphs[..chunk.start], options.overlap, |p| {
                !has_pending_segments(p)
            });
            tracing::debug!(
                "translating segments of {} paragraphs in {}..{}",
                pending.len(),
                chunk.start,
                chunk.end
            );

            match translation.translate_segments(&pending, &context).await {
                Ok(results) => {
                    let by_key: HashMap<(&str, &str), &str> = results
                        .iter()
                        .flat_map(|r| {
                            r.segments.iter().filter_map(|s| {
                                let translated = s.translation.trim();
                                (!translated.is_empty()).then_some((
                                    (r.paragraph_id.as_str(), s.id.as_str()),
                                    s.translation.as_str(),
                                ))
                            })
                        })
                        .collect();

                    for paragraph in &mut draft.paragraphs[chunk.start..chunk.end] {
                        let paragraph_id = paragraph.id.clone();
                        if let Some(segments) = &mut paragraph.segments {
                            for segment in segments {
                                if needs_translation(segment.translation.as_deref()) {
                                    if let Some(translated) =
                                        by_key.get(&(paragraph_id.as_str(), segment.id.as_str()))
                                    {
                                        segment.translation = Some((*translated).to_string());
                                    }
                                }
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        "segment translation failed for {}..{}, items stay pending: {error}",
                        chunk.start,
                        chunk.end
                    );
                }
            }
        }

        cursor = chunk.end;
        draft.last_processed_paragraph_index = Some(cursor);
        progress.on_progress(draft).await;
    }

    Ok(())
}
