//! # Paragraph construction
//!
//! Drives the correction capability over a long transcript in bounded,
//! resumable chunks and assembles the corrected words into speaker-tagged
//! paragraphs.
//!
//! Segments are first partitioned into maximal runs of constant speaker
//! ("groups"); each group's word list is then windowed independently. The
//! final paragraph of a non-final chunk is deliberately withheld: it may
//! extend past the window, so the cursor rewinds to its first word and the
//! next chunk re-corrects it with more right context. A chunk whose entire
//! content was dropped by the model rewinds into the overlap region instead
//! of skipping words.
//!
//! Correction failure is a hard abort — the chunk's text is unusable and
//! nothing is committed for it. The already-persisted cursors make a retry
//! resume from the last successful chunk.

use std::collections::HashMap;

use subtitle::{IdGenerator, Paragraph, Segment, Word, realign_words};

use crate::capability::{CorrectionCapability, ProgressSink};
use crate::chunk::{advance, next_chunk};
use crate::draft::PolishDraft;
use crate::error::{Error, Result};

/// Maximal run of consecutive segments sharing one speaker.
#[derive(Debug, Clone)]
pub(crate) struct SpeakerGroup {
    pub speaker_id: Option<String>,
    pub words: Vec<Word>,
}

pub(crate) fn speaker_groups(segments: &[Segment]) -> Vec<SpeakerGroup> {
    let mut groups: Vec<SpeakerGroup> = Vec::new();

    for segment in segments {
        match groups.last_mut() {
            Some(group) if group.speaker_id == segment.speaker_id => {
                group.words.extend(segment.words.iter().cloned());
            }
            _ => groups.push(SpeakerGroup {
                speaker_id: segment.speaker_id.clone(),
                words: segment.words.clone(),
            }),
        }
    }

    groups
}

/// Correct and paragraph the draft's segments, resuming from its cursors.
///
/// The progress sink is awaited after every chunk with the fully updated
/// draft; the callback for chunk k completes before chunk k+1 begins.
pub async fn polish_words(
    draft: &mut PolishDraft,
    correction: &dyn CorrectionCapability,
    ids: &mut dyn IdGenerator,
    progress: &mut dyn ProgressSink<PolishDraft>,
) -> Result<()> {
    let groups = speaker_groups(&draft.segments);
    let options = draft.options.normalized();

    while draft.last_processed_group_index < groups.len() {
        let group = &groups[draft.last_processed_group_index];
        let total = group.words.len();

        // Built once per group; maps corrected-word ids back to positions.
        let index_of: HashMap<&str, usize> = group
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.as_str(), i))
            .collect();

        while draft.last_processed_word_index < total {
            let previous = draft.last_processed_word_index;
            let chunk = next_chunk(total, previous, &options);
            tracing::debug!(
                "polishing group {} words {}..{} of {}",
                draft.last_processed_group_index,
                chunk.start,
                chunk.end,
                total
            );

            let slice = &group.words[chunk.start..chunk.end];
            let text: String = slice.iter().map(|w| w.text.as_str()).collect();

            let corrected = correction
                .correct_text(&text)
                .await
                .map_err(Error::Correction)?;

            let realigned = realign_words(slice, &corrected, ids);
            let mut paragraphs = split_paragraphs(realigned, ids);

            // Never advance all the way to the window end on an ambiguous
            // or empty result; fall back into the overlap region instead.
            let overlap_fallback = (chunk.end.saturating_sub(options.overlap)).max(chunk.start + 1);

            let proposed = if chunk.is_last {
                total
            } else if paragraphs.is_empty() {
                overlap_fallback
            } else {
                // Defer the tail paragraph; it may continue past the window.
                let tail = paragraphs.pop();
                tail.as_ref()
                    .and_then(|p| {
                        p.words
                            .iter()
                            .filter_map(|w| index_of.get(w.id.as_str()).copied())
                            .min()
                    })
                    .unwrap_or(overlap_fallback)
            };

            for mut paragraph in paragraphs {
                paragraph.speaker_id = group.speaker_id.clone();
                draft.paragraphs.push(paragraph);
            }

            draft.last_processed_word_index = advance(previous, proposed, total);
            progress.on_progress(draft).await;
        }

        draft.last_processed_word_index = 0;
        draft.last_processed_group_index += 1;
    }

    Ok(())
}

/// Split realigned words into paragraphs at newline-bearing tokens.
///
/// The boundary word sheds its leading whitespace (which carries the break)
/// so no emitted word ever contains a newline; a word left empty by that is
/// dropped but still terminates the preceding paragraph.
fn split_paragraphs(words: Vec<Word>, ids: &mut dyn IdGenerator) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<Word> = Vec::new();

    for mut word in words {
        if word.text.contains('\n') {
            if !current.is_empty() {
                paragraphs.push(make_paragraph(std::mem::take(&mut current), ids));
            }
            word.text = word.text.trim_start().to_string();
            if word.text.contains('\n') {
                // Break buried behind punctuation; keep the text on one line.
                word.text = word.text.replace('\n', " ");
            }
            if word.text.is_empty() {
                continue;
            }
        }
        current.push(word);
    }

    if !current.is_empty() {
        paragraphs.push(make_paragraph(current, ids));
    }

    paragraphs
}

fn make_paragraph(words: Vec<Word>, ids: &mut dyn IdGenerator) -> Paragraph {
    Paragraph {
        id: ids.next_id(),
        words,
        speaker_id: None,
        translation: None,
        segments: None,
    }
}
