use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One accepted dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Korean reading, the lookup key
    pub hangul: String,
    /// Hanja character(s) for the reading
    pub hanja: String,
    /// Free-form gloss, may be empty
    pub meaning: String,
}

impl DictionaryEntry {
    pub fn new(
        hangul: impl Into<String>,
        hanja: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            hangul: hangul.into(),
            hanja: hanja.into(),
            meaning: meaning.into(),
        }
    }
}

/// Row of the `hanja` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanjaRecord {
    pub id: i64,
    pub hangul: String,
    pub hanja: String,
    pub meaning: String,
    /// Reserved for ranking, always 0 in a fresh build
    pub frequency: i64,
}

impl HanjaRecord {
    /// `(hangul, hanja, meaning, frequency)` without the build-local id
    pub fn content(&self) -> (&str, &str, &str, i64) {
        (&self.hangul, &self.hanja, &self.meaning, self.frequency)
    }
}

/// How a single raw line was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Entry(DictionaryEntry),
    /// Empty after trimming
    Blank,
    /// Starts with `#`
    Comment,
    /// Too few fields, or empty hangul/hanja
    Malformed,
}

impl ParsedLine {
    pub fn into_entry(self) -> Option<DictionaryEntry> {
        match self {
            ParsedLine::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Counters for lines that did not produce a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipStats {
    pub blank: usize,
    pub comment: usize,
    pub malformed: usize,
}

impl SkipStats {
    pub fn record(&mut self, line: &ParsedLine) {
        match line {
            ParsedLine::Entry(_) => {}
            ParsedLine::Blank => self.blank += 1,
            ParsedLine::Comment => self.comment += 1,
            ParsedLine::Malformed => self.malformed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.blank + self.comment + self.malformed
    }
}

/// Result of one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub record_count: usize,
    /// Size of the committed artifact in bytes
    pub byte_size: u64,
    #[serde(default)]
    pub skipped: SkipStats,
}

impl BuildSummary {
    pub fn size_kib(&self) -> f64 {
        self.byte_size as f64 / 1024.0
    }
}
