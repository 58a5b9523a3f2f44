/// Error types shared by the scanner and the fixer

use std::io;
use std::path::PathBuf;

/// Errors produced while scanning or rewriting source files
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The scan root does not exist or is not a directory
    #[error("Scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A file named on the fix list does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8
    #[error("{} is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    /// Writing the rewritten content back failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file is missing or malformed
    #[error("Invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// A directory entry could not be visited during the walk
    #[error("Cannot walk {}: {reason}", path.display())]
    Walk { path: PathBuf, reason: String },

    /// A convention string produced an invalid regular expression
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A scan report could not be written or read back
    #[error("Invalid scan report {}: {reason}", path.display())]
    Report { path: PathBuf, reason: String },
}

impl AuditError {
    /// Classify an I/O failure on `path` into the matching variant
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => AuditError::FileNotFound(path),
            io::ErrorKind::InvalidData => AuditError::Decode { path },
            _ => AuditError::Read { path, source },
        }
    }
}
