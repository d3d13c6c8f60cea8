use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures at the repository provider boundary
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("failed to open mirror at {}: {}", .path.display(), .source.message())]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to clone {url} into {}: {}", .path.display(), .source.message())]
    Clone {
        url: String,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to remove remote-tracking references: {}", .0.message())]
    Reset(#[source] git2::Error),

    #[error("fetch failed: {}", .0.message())]
    Fetch(#[source] git2::Error),

    #[error("failed to restore remote-tracking references: {}", .0.message())]
    Restore(#[source] git2::Error),

    #[error("mirror is being refreshed, no read access within {0:?}")]
    Busy(Duration),

    #[error("sync task failed: {0}")]
    Task(String),
}
