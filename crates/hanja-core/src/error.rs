use std::path::PathBuf;

/// Failure to read a dictionary source
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Dictionary source not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid UTF-8 in dictionary source at line {line}")]
    Decoding { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
