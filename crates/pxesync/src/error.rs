use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    // Transport-level failures (connection, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    // Non-success HTTP status, carrying the textual status
    #[error("server returned {status} for {url}")]
    Protocol { status: String, url: String },

    // Malformed compressed stream
    #[error("invalid gzip stream: {0}")]
    Decompression(#[source] std::io::Error),

    // Malformed archive framing
    #[error("malformed archive: {0}")]
    Archive(#[source] std::io::Error),

    #[error("unsafe entry path in archive: {0}")]
    UnsafeEntryPath(String),

    // Any create/write/chmod/rename/delete failure
    #[error("filesystem error at {}: {}", path.display(), source)]
    Filesystem { path: PathBuf, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, SyncError>;
