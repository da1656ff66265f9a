use std::io;

use thiserror::Error;

/// Errors that can occur while resolving or bundling assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The requested filename failed validation. Callers must not reveal
    /// which rule fired; traversal attempts and disallowed extensions both
    /// map here.
    #[error("invalid asset request")]
    InvalidRequest,
    /// The filename was valid but no such file exists under the root.
    #[error("asset not found")]
    NotFound,
    /// No files matched the bundle filter; nothing to package.
    #[error("no files matched the bundle filter")]
    EmptyBundle,
    /// The bundle consumer went away mid-stream; the build was cancelled.
    #[error("bundle consumer disconnected")]
    Aborted,
    /// An I/O error occurred.
    #[error("asset IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The ZIP writer reported an internal fault.
    #[error("archive error: {0}")]
    Archive(zip::result::ZipError),
}

impl AssetError {
    /// Classifies an I/O error coming from the bundle's output sink: a
    /// broken pipe means the consumer disconnected and the build was
    /// cancelled, anything else is a real I/O failure.
    pub fn from_sink(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            Self::Aborted
        } else {
            Self::Io(err)
        }
    }
}
