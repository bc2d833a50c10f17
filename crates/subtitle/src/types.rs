/// One timestamped word as produced by the upstream transcription step.
///
/// `start`/`end` are seconds. `start <= end` is expected but not enforced;
/// ordering within a sequence is positional, not temporal. `text` may be a
/// whitespace-only run or the empty-string sentinel — both are legal words
/// and must survive round-trips untouched.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// One transcription unit as produced upstream, with an optional speaker.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub words: Vec<Word>,
    #[serde(default)]
    pub speaker_id: Option<String>,
}

/// Sub-sentence unit of a paragraph, carrying its own optional translation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceSegment {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// A corrected, speaker-attributed run of words.
///
/// `start`, `end` and `text` are derived from the word list. Translations
/// are only ever added, never required to be present.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: String,
    pub words: Vec<Word>,
    #[serde(default)]
    pub speaker_id: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<SentenceSegment>>,
}

impl Paragraph {
    pub fn start(&self) -> f64 {
        self.words.first().map_or(0.0, |w| w.start)
    }

    pub fn end(&self) -> f64 {
        self.words.last().map_or(0.0, |w| w.end)
    }

    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(id: &str, text: &str, start: f64, end: f64) -> Word {
        Word {
            id: id.to_string(),
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn paragraph_derives_bounds_and_text() {
        let p = Paragraph {
            id: "p0".into(),
            words: vec![word("a", "hello", 0.5, 1.0), word("b", " world", 1.2, 1.8)],
            speaker_id: None,
            translation: None,
            segments: None,
        };

        assert_eq!(p.start(), 0.5);
        assert_eq!(p.end(), 1.8);
        assert_eq!(p.text(), "hello world");
    }

    #[test]
    fn empty_paragraph_is_degenerate_but_valid() {
        let p = Paragraph {
            id: "p0".into(),
            words: vec![],
            speaker_id: None,
            translation: None,
            segments: None,
        };

        assert_eq!(p.start(), 0.0);
        assert_eq!(p.end(), 0.0);
        assert_eq!(p.text(), "");
    }

    #[test]
    fn serde_uses_camel_case_field_names() {
        let s = Segment {
            words: vec![word("w1", " hi", 0.0, 0.4)],
            speaker_id: Some("spk-0".into()),
        };

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["speakerId"], "spk-0");
        assert_eq!(json["words"][0]["id"], "w1");

        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
