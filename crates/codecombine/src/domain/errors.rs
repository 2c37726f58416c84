//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a combine run.
///
/// Every variant is fatal: the run stops at the first one and the output file
/// keeps whatever was written before it.
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("failed to list directory {}", dir.display())]
    Enumerate {
        dir: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("entry name {} is not valid UTF-8", path.display())]
    EntryName { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid extension set: {reason}")]
    InvalidExtension { reason: String },
}
