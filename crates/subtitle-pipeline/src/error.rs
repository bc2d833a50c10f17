use crate::capability::CapabilityError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The correction capability reported failure. The whole run aborts;
    /// the persisted cursor makes a retry resume from the last good chunk.
    #[error("llm correction failed: {0}")]
    Correction(CapabilityError),
    /// Segment-level translation was requested before paragraph-level
    /// translation completed.
    #[error("paragraphs must be translated before segment translation")]
    ParagraphsNotTranslated,
}
