use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("failed to write profile to {}: {source}", path.display())]
    PersistenceWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("copy failed ({} -> {}): {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}
