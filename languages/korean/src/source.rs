use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use hanja_core::{DictionaryEntry, LoadError, ParsedLine, SkipStats};

use crate::parser::classify_line;

/// Lazy reader over a dictionary text source, yielding accepted entries.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub struct DictionarySource<R> {
    reader: R,
    buf: Vec<u8>,
    /// Previous line ended in `\r`; a leading `\n` belongs to it
    after_cr: bool,
    line_no: usize,
    stats: SkipStats,
    done: bool,
}

impl DictionarySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })?;
        tracing::info!("Reading dictionary source {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> DictionarySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            after_cr: false,
            line_no: 0,
            stats: SkipStats::default(),
            done: false,
        }
    }

    /// Lines skipped so far
    pub fn stats(&self) -> SkipStats {
        self.stats
    }

    /// Lines read so far, including skipped ones
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Read the next line into `buf` without its terminator. `false` at end of input.
    fn read_raw_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(!self.buf.is_empty());
            }

            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.after_cr = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for DictionarySource<R> {
    type Item = Result<DictionaryEntry, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.read_raw_line() {
                Ok(false) => self.done = true,
                Ok(true) => {
                    self.line_no += 1;
                    let Ok(line) = std::str::from_utf8(&self.buf) else {
                        self.done = true;
                        let line = self.line_no;
                        tracing::warn!("Dictionary source is not valid UTF-8 at line {line}");
                        return Some(Err(LoadError::Decoding { line }));
                    };
                    match classify_line(line) {
                        ParsedLine::Entry(entry) => return Some(Ok(entry)),
                        skipped => {
                            tracing::trace!(line = self.line_no, kind = ?skipped, "skipping line");
                            self.stats.record(&skipped);
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(LoadError::Io(e)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_yields_entries_and_counts_skips() {
        let text = "# header\n\n가:家:집\nbroken\n나:那:that\r\n";
        let mut source = DictionarySource::from_reader(Cursor::new(text));

        let entries: Vec<_> = source.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            entries,
            vec![
                DictionaryEntry::new("가", "家", "집"),
                DictionaryEntry::new("나", "那", "that"),
            ]
        );

        let stats = source.stats();
        assert_eq!(stats.comment, 1);
        assert_eq!(stats.blank, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(source.lines_read(), 5);
    }

    #[test]
    fn test_carriage_return_ends_lines() {
        let source = DictionarySource::from_reader(Cursor::new("가:家:집\r나:那:어찌\r"));
        let entries: Vec<_> = source.collect::<Result<_, _>>().unwrap();
        assert_eq!(
            entries,
            vec![
                DictionaryEntry::new("가", "家", "집"),
                DictionaryEntry::new("나", "那", "어찌"),
            ]
        );
    }

    #[test]
    fn test_mixed_line_endings() {
        let text = "가:家:집\r\n\r\r# note\n나:那:어찌\r\n다:多:많을";
        let mut source = DictionarySource::from_reader(Cursor::new(text));
        let entries: Vec<_> = source.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].meaning, "어찌");
        assert_eq!(source.stats().blank, 2);
        assert_eq!(source.stats().comment, 1);
        assert_eq!(source.lines_read(), 6);
    }

    #[test]
    fn test_crlf_split_across_buffer_refills() {
        let text = "가:家:집\r\n나:那:어찌\r\n";
        let reader = BufReader::with_capacity(1, Cursor::new(text));
        let mut source = DictionarySource::from_reader(reader);
        let entries: Vec<_> = source.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(source.stats().total(), 0);
        assert_eq!(source.lines_read(), 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let source = DictionarySource::from_reader(Cursor::new("다:多:many"));
        let entries: Vec<_> = source.collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_reports_line_and_stops() {
        let mut bytes = b"\xea\xb0\x80:\xe5\xae\xb6:house\n".to_vec();
        bytes.extend_from_slice(b"\xff\xfe:bad:line\n");
        bytes.extend_from_slice("나:那:that\n".as_bytes());

        let mut source = DictionarySource::from_reader(Cursor::new(bytes));
        assert!(matches!(source.next(), Some(Ok(_))));
        assert!(matches!(
            source.next(),
            Some(Err(LoadError::Decoding { line: 2 }))
        ));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("hanja.txt");
        assert!(matches!(
            DictionarySource::open(&missing),
            Err(LoadError::FileNotFound(p)) if p == missing
        ));
    }
}
