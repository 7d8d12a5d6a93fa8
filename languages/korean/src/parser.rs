//! Line parser for libhangul's `hanja.txt`.
//!
//! Each line is `HANGUL:HANJA:MEANING`. Fields are positional and split on every `:`,
//! so anything after the third field is dropped and a colon inside the meaning cuts it short.

use hanja_core::{DictionaryEntry, ParsedLine};

const COMMENT_MARKER: char = '#';
const FIELD_DELIMITER: char = ':';

/// Classify a raw line
pub fn classify_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }
    if line.starts_with(COMMENT_MARKER) {
        return ParsedLine::Comment;
    }

    let mut fields = line.split(FIELD_DELIMITER);
    let (Some(hangul), Some(hanja), Some(meaning)) = (fields.next(), fields.next(), fields.next())
    else {
        return ParsedLine::Malformed;
    };

    let hangul = hangul.trim();
    let hanja = hanja.trim();
    if hangul.is_empty() || hanja.is_empty() {
        return ParsedLine::Malformed;
    }

    ParsedLine::Entry(DictionaryEntry::new(hangul, hanja, meaning.trim()))
}

/// Parse a raw line, `None` for blank, comment and malformed lines
pub fn parse_line(line: &str) -> Option<DictionaryEntry> {
    classify_line(line).into_entry()
}
