//! # Script-aware lossless tokenizer
//!
//! Splits raw text into the minimal units the diff and realignment layers
//! operate on. The contract is strict losslessness: concatenating the
//! returned tokens reproduces the input byte-for-byte.
//!
//! ## Token classes
//!
//! - Latin/word run — letters, digits, internal hyphens and apostrophes.
//!   A leading or trailing hyphen belongs to the run ("-ish", "trailing-").
//! - Dotted abbreviation — a small closed set ("Dr.", "St.", "Co.", "Rd.")
//!   fused with the word run that follows it, so "St. Louis" stays one token.
//! - CJK character — Han, Hiragana, Katakana and Hangul are emitted one
//!   character per token; there are no word boundaries to recover.
//! - Punctuation — narrow (ASCII/Latin) punctuation buffers as a prefix on
//!   the next non-punctuation token; full-width/CJK punctuation stands alone.
//! - Whitespace — attaches as a prefix to the following token. A word in
//!   this model carries its own leading spacing, which is what makes the
//!   concatenation property hold.

const ABBREVIATIONS: [&str; 4] = ["Dr", "St", "Co", "Rd"];

/// Split `text` into lossless tokens. Empty input yields an empty sequence.
///
/// Deterministic and pure; timestamps are not involved at this layer.
pub fn tokenize(text: &str) -> Vec<String> {
    attach(scan(text))
}

// ── Phase 1: raw unit scan ───────────────────────────────────────────────────

#[derive(Debug)]
enum Unit {
    Whitespace(String),
    Word { text: String, abbreviation: bool },
    Cjk(char),
    NarrowPunct(String),
    WidePunct(char),
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'   // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
        | '\u{3040}'..='\u{309F}' // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{31F0}'..='\u{31FF}' // Katakana Phonetic Extensions
        | '\u{AC00}'..='\u{D7AF}' // Hangul Syllables
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{3130}'..='\u{318F}' // Hangul Compatibility Jamo
    )
}

fn is_wide_punct(c: char) -> bool {
    // U+3000 (ideographic space) is whitespace and never reaches this check.
    matches!(c,
        '\u{3001}'..='\u{303F}'
        | '\u{FF01}'..='\u{FF0F}'
        | '\u{FF1A}'..='\u{FF20}'
        | '\u{FF3B}'..='\u{FF40}'
        | '\u{FF5B}'..='\u{FF65}'
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() && !is_cjk(c)
}

fn starts_word(chars: &[char], i: usize) -> bool {
    match chars.get(i) {
        Some(&c) if is_word_char(c) => true,
        Some('-') => chars.get(i + 1).is_some_and(|&n| is_word_char(n)),
        _ => false,
    }
}

fn scan(text: &str) -> Vec<Unit> {
    let chars: Vec<char> = text.chars().collect();
    let mut units = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            units.push(Unit::Whitespace(chars[start..i].iter().collect()));
        } else if is_cjk(c) {
            units.push(Unit::Cjk(c));
            i += 1;
        } else if is_wide_punct(c) {
            units.push(Unit::WidePunct(c));
            i += 1;
        } else if starts_word(&chars, i) {
            units.push(scan_word(&chars, &mut i));
        } else {
            let start = i;
            while i < chars.len() {
                let p = chars[i];
                if p.is_whitespace() || is_cjk(p) || is_wide_punct(p) || starts_word(&chars, i) {
                    break;
                }
                i += 1;
            }
            units.push(Unit::NarrowPunct(chars[start..i].iter().collect()));
        }
    }

    units
}

fn scan_word(chars: &[char], i: &mut usize) -> Unit {
    let start = *i;
    if chars[*i] == '-' {
        *i += 1;
    }
    while *i < chars.len() {
        let c = chars[*i];
        if is_word_char(c) || c == '-' {
            *i += 1;
        } else if c == '\'' && chars.get(*i + 1).is_some_and(|&n| is_word_char(n)) {
            *i += 1;
        } else {
            break;
        }
    }

    let mut text: String = chars[start..*i].iter().collect();
    let abbreviation = ABBREVIATIONS.contains(&text.as_str()) && chars.get(*i) == Some(&'.');
    if abbreviation {
        text.push('.');
        *i += 1;
    }

    Unit::Word { text, abbreviation }
}

// ── Phase 2: attachment policy ───────────────────────────────────────────────

fn attach(units: Vec<Unit>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    // Whitespace and narrow punctuation waiting for the token they prefix.
    let mut prefix = String::new();
    // Set after emitting an abbreviation token; the next word run fuses in.
    let mut pending_abbreviation = false;

    for unit in units {
        match unit {
            Unit::Whitespace(s) => {
                let last_is_whitespace =
                    prefix.is_empty() && tokens.last().is_some_and(|t| t.trim().is_empty());
                if last_is_whitespace {
                    // Coalesce consecutive whitespace-only outputs.
                    if let Some(last) = tokens.last_mut() {
                        last.push_str(&s);
                    }
                } else {
                    prefix.push_str(&s);
                }
            }
            Unit::NarrowPunct(p) => {
                prefix.push_str(&p);
                pending_abbreviation = false;
            }
            Unit::Cjk(c) | Unit::WidePunct(c) => {
                let mut token = std::mem::take(&mut prefix);
                token.push(c);
                tokens.push(token);
                pending_abbreviation = false;
            }
            Unit::Word { text, abbreviation } => {
                let mut token = std::mem::take(&mut prefix);
                token.push_str(&text);
                match tokens.last_mut() {
                    Some(last) if pending_abbreviation => last.push_str(&token),
                    _ => tokens.push(token),
                }
                pending_abbreviation = abbreviation;
            }
        }
    }

    if !prefix.is_empty() {
        match tokens.last_mut() {
            Some(last) if last.trim().is_empty() => last.push_str(&prefix),
            _ => tokens.push(prefix),
        }
    }

    tokens
}
