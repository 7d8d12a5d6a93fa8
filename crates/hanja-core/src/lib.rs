pub mod dictionary;
pub mod error;

pub use dictionary::{BuildSummary, DictionaryEntry, HanjaRecord, ParsedLine, SkipStats};
pub use error::LoadError;
