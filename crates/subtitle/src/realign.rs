//! # Timestamp realignment
//!
//! Reconciles free-form corrected text back onto exact timestamps. The
//! corrected text is tokenized, diffed against the original words, and the
//! diff is replayed into a new word sequence:
//!
//! - unchanged words keep their timestamps bit-for-bit
//! - modified words keep id and timestamps, only the text changes
//! - removed words are dropped
//! - inserted tokens get a fresh id and interpolated timestamps, anchored
//!   on the nearest already-emitted word (left) and the nearest
//!   not-yet-consumed original word (right)

use crate::diff::{DiffEntry, ExactMatch, diff_words};
use crate::id::IdGenerator;
use crate::tokenizer::tokenize;
use crate::types::Word;

/// Rebuild a timestamped word sequence from `original` words and the
/// `corrected` text. Output order follows the corrected-text tokens.
pub fn realign_words(original: &[Word], corrected: &str, ids: &mut dyn IdGenerator) -> Vec<Word> {
    let tokens = tokenize(corrected);
    let entries = diff_words(original, &tokens, &ExactMatch);

    let avg_duration = if original.is_empty() {
        1.0
    } else {
        original.iter().map(|w| w.end - w.start).sum::<f64>() / original.len() as f64
    };

    // Right anchor per entry: the first original word at or after that
    // position. Removed words still count — they are not yet consumed when
    // an earlier insertion resolves.
    let mut next_original: Vec<Option<&Word>> = vec![None; entries.len()];
    let mut carry: Option<&Word> = None;
    for (i, entry) in entries.iter().enumerate().rev() {
        carry = match entry {
            DiffEntry::Unchanged(w) | DiffEntry::Modified { word: w, .. } | DiffEntry::Removed(w) => {
                Some(w)
            }
            DiffEntry::Added(_) => carry,
        };
        next_original[i] = carry;
    }

    let mut out: Vec<Word> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            DiffEntry::Unchanged(word) => out.push(word.clone()),
            DiffEntry::Modified { word, new_text } => out.push(Word {
                id: word.id.clone(),
                text: new_text.clone(),
                start: word.start,
                end: word.end,
            }),
            DiffEntry::Removed(_) => {}
            DiffEntry::Added(text) => {
                let (start, end) =
                    interpolate(text, out.last(), next_original[i], avg_duration);
                out.push(Word {
                    id: ids.next_id(),
                    text: text.clone(),
                    start,
                    end,
                });
            }
        }
    }

    out
}

fn char_len(s: &str) -> f64 {
    s.chars().count() as f64
}

fn interpolate(
    text: &str,
    left: Option<&Word>,
    right: Option<&Word>,
    avg_duration: f64,
) -> (f64, f64) {
    let inserted_len = char_len(text);

    match (left, right) {
        (Some(l), Some(r)) => {
            let ratio = inserted_len / (char_len(&l.text) + inserted_len + char_len(&r.text));
            (l.end, l.end + (r.start - l.end) * ratio)
        }
        (Some(l), None) => {
            let left_len = char_len(&l.text);
            let duration = if left_len == 0.0 {
                avg_duration
            } else {
                avg_duration * inserted_len / left_len
            };
            (l.end, l.end + duration)
        }
        (None, Some(r)) => {
            let right_len = char_len(&r.text);
            let duration = if right_len == 0.0 {
                avg_duration
            } else {
                avg_duration * inserted_len / right_len
            };
            ((r.start - duration).max(0.0), r.start)
        }
        // Empty original sequence: fixed fallback for the first insertion;
        // later insertions chain off the previously inserted word.
        (None, None) => (0.0, 1.0),
    }
}
