pub mod diff;
pub mod id;
pub mod realign;
pub mod tokenizer;
pub mod types;

pub use diff::{DiffEntry, ExactMatch, TextMatcher, diff_words};
pub use id::{IdGenerator, SequentialIdGen, UuidIdGen};
pub use realign::realign_words;
pub use tokenizer::tokenize;
pub use types::{Paragraph, Segment, SentenceSegment, Word};
