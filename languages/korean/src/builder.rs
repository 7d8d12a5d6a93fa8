use std::fs;
use std::path::{Path, PathBuf};

use hanja_core::{BuildSummary, DictionaryEntry, LoadError, SkipStats};
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

use crate::source::DictionarySource;

const SCHEMA: &str = "
    CREATE TABLE hanja (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hangul TEXT NOT NULL,
        hanja TEXT NOT NULL,
        meaning TEXT DEFAULT '',
        frequency INTEGER DEFAULT 0
    );
    CREATE INDEX idx_hanja_hangul ON hanja(hangul);
";

const INSERT_ENTRY: &str =
    "INSERT INTO hanja (hangul, hanja, meaning, frequency) VALUES (?1, ?2, ?3, 0)";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read dictionary: {0}")]
    Load(#[from] LoadError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move database into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Writes a fresh `hanja` database, replacing whatever is at the output path.
///
/// The database is built in a temporary file next to the output and renamed over it
/// only after the insert transaction commits, so the output path always holds either
/// the previous artifact or the complete new one.
pub struct HanjaDbBuilder {
    output: PathBuf,
}

impl HanjaDbBuilder {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Insert `entries` in order and commit. The first `Err` aborts the build.
    pub fn build<I>(&self, entries: I) -> Result<BuildSummary, BuildError>
    where
        I: IntoIterator<Item = Result<DictionaryEntry, LoadError>>,
    {
        let staging = self.staging_file()?;
        tracing::debug!("Staging database at {}", staging.path().display());

        let record_count = {
            let mut conn = Connection::open(staging.path())?;
            conn.execute_batch(SCHEMA)?;
            tracing::debug!("Created hanja table and hangul index");

            let tx = conn.transaction()?;
            let mut count = 0usize;
            {
                let mut stmt = tx.prepare(INSERT_ENTRY)?;
                for entry in entries {
                    let entry = entry?;
                    stmt.execute(params![entry.hangul, entry.hanja, entry.meaning])?;
                    count += 1;
                }
            }
            tx.commit()?;
            tracing::debug!("Committed {count} records");

            conn.close().map_err(|(_, e)| e)?;
            count
        };

        set_readable(&staging)?;
        staging.persist(&self.output)?;

        let byte_size = fs::metadata(&self.output)
            .map_err(|source| BuildError::Io {
                path: self.output.clone(),
                source,
            })?
            .len();

        tracing::info!(
            "Built {} with {record_count} records ({byte_size} bytes)",
            self.output.display()
        );

        Ok(BuildSummary {
            output_path: self.output.clone(),
            record_count,
            byte_size,
            skipped: SkipStats::default(),
        })
    }

    /// Temp file in the output directory so the final rename stays on one filesystem
    fn staging_file(&self) -> Result<NamedTempFile, BuildError> {
        let dir = match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let io_err = |source| BuildError::Io {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;
        tempfile::Builder::new()
            .prefix(".hanja-")
            .suffix(".db.tmp")
            .tempfile_in(&dir)
            .map_err(io_err)
    }
}

#[cfg(unix)]
fn set_readable(file: &NamedTempFile) -> Result<(), BuildError> {
    use std::os::unix::fs::PermissionsExt;

    file.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
        .map_err(|source| BuildError::Io {
            path: file.path().to_path_buf(),
            source,
        })
}

#[cfg(not(unix))]
fn set_readable(_file: &NamedTempFile) -> Result<(), BuildError> {
    Ok(())
}

/// Parse `input` and build the database at `output`
pub fn build_from_file(input: &Path, output: &Path) -> Result<BuildSummary, BuildError> {
    let mut source = DictionarySource::open(input)?;
    let mut summary = HanjaDbBuilder::new(output).build(&mut source)?;
    summary.skipped = source.stats();

    tracing::info!(
        "Read {} lines, skipped {}",
        source.lines_read(),
        summary.skipped.total()
    );

    Ok(summary)
}
