use git2::Repository;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::error::MirrorError;
use crate::mirror::{ensure_mirror, fetch, reset_remote_refs, restore_remote_refs, FetchSummary};
use crate::remote::Credentials;

/// Longest a reader waits for a refresh to finish
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

struct Inner {
    location: PathBuf,
    remote_url: String,
    credentials: Option<Credentials>,
    /// Readers share, a refresh cycle is exclusive
    gate: RwLock<()>,
}

/// The mirror as seen by concurrent graph builds and the sync worker.
///
/// A refresh removes all remote-tracking refs and fetches them again while
/// holding the write side of the gate, so a reader never sees the mirror
/// between those two steps. Each reader opens its own repository handle.
#[derive(Clone)]
pub struct SharedMirror {
    inner: Arc<Inner>,
    read_timeout: Duration,
}

impl SharedMirror {
    /// Open or clone the mirror and bring it up to date
    pub fn ensure(
        location: impl Into<PathBuf>,
        remote_url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Result<Self, MirrorError> {
        let location = location.into();
        let remote_url = remote_url.into();

        let repo = ensure_mirror(&location, &remote_url, credentials.as_ref())?;
        let summary = fetch(&repo, credentials.as_ref())?;
        info!(
            "Mirror ready at {} ({} objects received)",
            location.display(),
            summary.received_objects
        );

        Ok(Self {
            inner: Arc::new(Inner {
                location,
                remote_url,
                credentials,
                gate: RwLock::new(()),
            }),
            read_timeout: DEFAULT_READ_TIMEOUT,
        })
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn location(&self) -> &Path {
        &self.inner.location
    }

    pub fn remote_url(&self) -> &str {
        &self.inner.remote_url
    }

    /// Run `f` against a consistent view of the mirror.
    ///
    /// Fails with [`MirrorError::Busy`] rather than waiting past the read
    /// timeout for a refresh to finish.
    pub fn read<R>(&self, f: impl FnOnce(Repository) -> anyhow::Result<R>) -> anyhow::Result<R> {
        let _guard = self
            .inner
            .gate
            .try_read_for(self.read_timeout)
            .ok_or(MirrorError::Busy(self.read_timeout))?;
        let repo = self.open()?;
        f(repo)
    }

    /// One refresh cycle: remove remote-tracking refs, then fetch.
    ///
    /// On fetch failure the removed refs are restored, so readers keep
    /// seeing the last good state.
    pub fn refresh(&self) -> Result<FetchSummary, MirrorError> {
        let _guard = self.inner.gate.write();
        let repo = self.open()?;

        let snapshot = reset_remote_refs(&repo)?;
        match fetch(&repo, self.inner.credentials.as_ref()) {
            Ok(summary) => Ok(summary),
            Err(err) => {
                if let Err(restore_err) = restore_remote_refs(&repo, &snapshot) {
                    error!("Could not restore mirror after failed fetch: {}", restore_err);
                }
                Err(err)
            }
        }
    }

    fn open(&self) -> Result<Repository, MirrorError> {
        Repository::open(&self.inner.location).map_err(|source| MirrorError::Open {
            path: self.inner.location.clone(),
            source,
        })
    }
}
