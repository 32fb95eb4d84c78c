//! Error types and exit code mapping
//!
//! Every failure the pipeline can report falls into one of three classes:
//! usage errors, I/O errors, and resource-limit errors. Each class maps to a
//! distinct process exit code.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit code for unreadable inputs or unwritable destinations
pub const EXIT_IO: u8 = 1;
/// Exit code for invalid or conflicting arguments
pub const EXIT_USAGE: u8 = 2;
/// Exit code when the storage layer refuses further writes
pub const EXIT_RESOURCE_LIMIT: u8 = 3;
/// Exit code after Ctrl-C / SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

#[cfg(target_os = "linux")]
const EDQUOT: i32 = 122;

/// Errors raised while generating candidates
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid or conflicting arguments
    #[error("{0}")]
    Usage(String),

    /// A wordlist could not be read, or the destination could not be prepared
    #[error("{context}: {}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Storage quota, disk space or file size limit hit while writing
    #[error("{context}: {} (storage limit reached, adjust quota or free space)", .path.display())]
    ResourceLimit {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The estimated candidate count exceeds `--max-candidates`
    #[error("estimated {estimate} candidates exceeds the configured limit of {limit}")]
    TooManyCandidates { estimate: u64, limit: u64 },
}

impl GenError {
    /// Classify an I/O error, separating storage-limit failures from the rest
    pub fn from_io(context: &'static str, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if is_resource_limit(&source) {
            Self::ResourceLimit { context, path, source }
        } else {
            Self::Io { context, path, source }
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            Self::Io { .. } => EXIT_IO,
            Self::ResourceLimit { .. } | Self::TooManyCandidates { .. } => EXIT_RESOURCE_LIMIT,
        }
    }
}

fn is_resource_limit(err: &io::Error) -> bool {
    if matches!(err.kind(), io::ErrorKind::StorageFull | io::ErrorKind::FileTooLarge) {
        return true;
    }

    #[cfg(target_os = "linux")]
    if err.raw_os_error() == Some(EDQUOT) {
        return true;
    }

    false
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_full_is_resource_limit() {
        let err = GenError::from_io(
            "Failed to write output",
            Path::new("out.txt"),
            io::Error::from(io::ErrorKind::StorageFull),
        );
        assert!(matches!(err, GenError::ResourceLimit { .. }));
        assert_eq!(err.exit_code(), EXIT_RESOURCE_LIMIT);
    }

    #[test]
    fn test_file_too_large_is_resource_limit() {
        let err = GenError::from_io(
            "Failed to write output",
            Path::new("out.txt"),
            io::Error::from(io::ErrorKind::FileTooLarge),
        );
        assert_eq!(err.exit_code(), EXIT_RESOURCE_LIMIT);
    }

    #[test]
    fn test_not_found_is_io() {
        let err = GenError::from_io(
            "Failed to open wordlist",
            Path::new("missing.txt"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, GenError::Io { .. }));
        assert_eq!(err.exit_code(), EXIT_IO);
        assert_eq!(err.to_string(), "Failed to open wordlist: missing.txt");
    }

    #[test]
    fn test_usage_and_limit_codes() {
        assert_eq!(GenError::Usage("bad".into()).exit_code(), EXIT_USAGE);
        let err = GenError::TooManyCandidates { estimate: 10, limit: 5 };
        assert_eq!(err.exit_code(), EXIT_RESOURCE_LIMIT);
    }
}
