//! # Word-level sequence diff
//!
//! Aligns an old sequence of timestamped [`Word`]s against a new sequence of
//! plain text tokens and classifies every element on both sides exactly once.
//!
//! The alignment itself is Myers LCS (via `similar`); this module owns the
//! run classification policy on top of it:
//!
//! - adjacent removed/added runs pair up positionally (first removed with
//!   first added) and become `Modified`; the surplus stays removed/added.
//! - pairs inside an equal run are re-checked with *literal* equality. The
//!   injected matcher governs alignment only; `Unchanged` always means the
//!   text is byte-identical.

use std::convert::Infallible;

use similar::algorithms::{DiffHook, Replace, myers};

use crate::types::Word;

/// Outcome of aligning one element. Covers every old word and every new
/// token exactly once across the returned list.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEntry {
    Unchanged(Word),
    Modified { word: Word, new_text: String },
    Removed(Word),
    Added(String),
}

/// Equality strategy used during alignment.
pub trait TextMatcher {
    fn matches(&self, old: &str, new: &str) -> bool;
}

/// Literal string equality; the default matcher.
pub struct ExactMatch;

impl TextMatcher for ExactMatch {
    fn matches(&self, old: &str, new: &str) -> bool {
        old == new
    }
}

impl<F> TextMatcher for F
where
    F: Fn(&str, &str) -> bool,
{
    fn matches(&self, old: &str, new: &str) -> bool {
        self(old, new)
    }
}

/// Diff `old` words against `new` tokens using `matcher` for alignment.
///
/// Total function: degenerate inputs (either side empty) yield pure
/// removed/added runs, never an error.
pub fn diff_words(old: &[Word], new: &[String], matcher: &dyn TextMatcher) -> Vec<DiffEntry> {
    let old_toks: Vec<OldTok<'_>> = old.iter().map(|w| OldTok(w.text.as_str())).collect();
    let new_toks: Vec<NewTok<'_>> = new
        .iter()
        .map(|t| NewTok {
            text: t.as_str(),
            matcher,
        })
        .collect();

    let mut hook = Replace::new(Collector {
        old,
        new,
        entries: Vec::new(),
    });

    let run = myers::diff(
        &mut hook,
        &old_toks[..],
        0..old_toks.len(),
        &new_toks[..],
        0..new_toks.len(),
    );
    match run {
        Ok(()) => {}
        Err(never) => match never {},
    }
    match hook.finish() {
        Ok(()) => {}
        Err(never) => match never {},
    }

    hook.into_inner().entries
}

// ── Myers adapter ────────────────────────────────────────────────────────────

// Distinct old/new element types so the matcher is only ever consulted in
// one direction: matches(old, new).
struct OldTok<'a>(&'a str);

struct NewTok<'a> {
    text: &'a str,
    matcher: &'a dyn TextMatcher,
}

impl<'a> PartialEq<OldTok<'a>> for NewTok<'a> {
    fn eq(&self, other: &OldTok<'a>) -> bool {
        self.matcher.matches(other.0, self.text)
    }
}

struct Collector<'a> {
    old: &'a [Word],
    new: &'a [String],
    entries: Vec<DiffEntry>,
}

impl DiffHook for Collector<'_> {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Infallible> {
        for i in 0..len {
            let word = &self.old[old_index + i];
            let token = &self.new[new_index + i];
            if word.text == *token {
                self.entries.push(DiffEntry::Unchanged(word.clone()));
            } else {
                // The matcher accepted the pair but the literal text differs.
                self.entries.push(DiffEntry::Modified {
                    word: word.clone(),
                    new_text: token.clone(),
                });
            }
        }
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        _new_index: usize,
    ) -> Result<(), Infallible> {
        for word in &self.old[old_index..old_index + old_len] {
            self.entries.push(DiffEntry::Removed(word.clone()));
        }
        Ok(())
    }

    fn insert(
        &mut self,
        _old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Infallible> {
        for token in &self.new[new_index..new_index + new_len] {
            self.entries.push(DiffEntry::Added(token.clone()));
        }
        Ok(())
    }

    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Infallible> {
        let paired = old_len.min(new_len);
        for i in 0..paired {
            self.entries.push(DiffEntry::Modified {
                word: self.old[old_index + i].clone(),
                new_text: self.new[new_index + i].clone(),
            });
        }
        for word in &self.old[old_index + paired..old_index + old_len] {
            self.entries.push(DiffEntry::Removed(word.clone()));
        }
        for token in &self.new[new_index + paired..new_index + new_len] {
            self.entries.push(DiffEntry::Added(token.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Word {
                id: format!("w{i}"),
                text: t.to_string(),
                start: i as f64,
                end: i as f64 + 1.0,
            })
            .collect()
    }

    fn tokens(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    /// Every old index must appear exactly once across unchanged/modified/
    /// removed, and every new index exactly once across unchanged/modified/
    /// added.
    fn assert_complete(old: &[Word], new: &[String], entries: &[DiffEntry]) {
        let mut old_seen = 0usize;
        let mut new_seen = 0usize;
        for e in entries {
            match e {
                DiffEntry::Unchanged(w) => {
                    assert_eq!(w.id, old[old_seen].id);
                    old_seen += 1;
                    new_seen += 1;
                }
                DiffEntry::Modified { word, new_text } => {
                    assert_eq!(word.id, old[old_seen].id);
                    assert_eq!(*new_text, new[new_seen]);
                    old_seen += 1;
                    new_seen += 1;
                }
                DiffEntry::Removed(w) => {
                    assert_eq!(w.id, old[old_seen].id);
                    old_seen += 1;
                }
                DiffEntry::Added(t) => {
                    assert_eq!(*t, new[new_seen]);
                    new_seen += 1;
                }
            }
        }
        assert_eq!(old_seen, old.len(), "every old word covered");
        assert_eq!(new_seen, new.len(), "every new token covered");
    }

    #[test]
    fn identical_sequences_are_all_unchanged() {
        let old = words(&["a", "b", "c"]);
        let new = tokens(&["a", "b", "c"]);
        let entries = diff_words(&old, &new, &ExactMatch);
        assert!(entries.iter().all(|e| matches!(e, DiffEntry::Unchanged(_))));
        assert_complete(&old, &new, &entries);
    }

    #[test]
    fn both_empty_yields_empty_diff() {
        assert!(diff_words(&[], &[], &ExactMatch).is_empty());
    }

    #[test]
    fn empty_old_side_is_all_added() {
        let new = tokens(&["x", "y"]);
        let entries = diff_words(&[], &new, &ExactMatch);
        assert_eq!(
            entries,
            vec![
                DiffEntry::Added("x".into()),
                DiffEntry::Added("y".into()),
            ]
        );
    }

    #[test]
    fn empty_new_side_is_all_removed() {
        let old = words(&["x", "y"]);
        let entries = diff_words(&old, &[], &ExactMatch);
        assert!(entries.iter().all(|e| matches!(e, DiffEntry::Removed(_))));
        assert_complete(&old, &[], &entries);
    }

    #[test]
    fn adjacent_removed_added_runs_pair_positionally() {
        let old = words(&["keep", "one", "two", "keep2"]);
        let new = tokens(&["keep", "uno", "dos", "tres", "keep2"]);
        let entries = diff_words(&old, &new, &ExactMatch);

        assert_eq!(
            entries,
            vec![
                DiffEntry::Unchanged(old[0].clone()),
                DiffEntry::Modified {
                    word: old[1].clone(),
                    new_text: "uno".into()
                },
                DiffEntry::Modified {
                    word: old[2].clone(),
                    new_text: "dos".into()
                },
                DiffEntry::Added("tres".into()),
                DiffEntry::Unchanged(old[3].clone()),
            ]
        );
        assert_complete(&old, &new, &entries);
    }

    #[test]
    fn surplus_removed_stays_removed() {
        let old = words(&["a", "b", "c", "z"]);
        let new = tokens(&["x", "z"]);
        let entries = diff_words(&old, &new, &ExactMatch);

        assert_eq!(
            entries,
            vec![
                DiffEntry::Modified {
                    word: old[0].clone(),
                    new_text: "x".into()
                },
                DiffEntry::Removed(old[1].clone()),
                DiffEntry::Removed(old[2].clone()),
                DiffEntry::Unchanged(old[3].clone()),
            ]
        );
        assert_complete(&old, &new, &entries);
    }

    #[test]
    fn custom_matcher_aligns_but_unchanged_means_literal() {
        let old = words(&["Hello", "world"]);
        let new = tokens(&["hello", "world"]);
        let ci = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
        let entries = diff_words(&old, &new, &ci);

        // "Hello"/"hello" aligned by the matcher, then demoted to Modified
        // because the literal text differs.
        assert_eq!(
            entries,
            vec![
                DiffEntry::Modified {
                    word: old[0].clone(),
                    new_text: "hello".into()
                },
                DiffEntry::Unchanged(old[1].clone()),
            ]
        );
        assert_complete(&old, &new, &entries);
    }

    #[test]
    fn completeness_holds_for_scrambled_input() {
        let old = words(&["the", "quick", "brown", "fox", "jumps"]);
        let new = tokens(&["a", "quick", "red", "fox", "leaps", "high"]);
        let entries = diff_words(&old, &new, &ExactMatch);
        assert_complete(&old, &new, &entries);
    }
}
