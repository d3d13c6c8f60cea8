use git2::{build::RepoBuilder, ErrorCode, Oid, Repository};
use std::path::Path;
use tracing::{debug, info};

use crate::error::MirrorError;
use crate::remote::{fetch_options, Credentials, DEFAULT_REMOTE};

/// Open the bare mirror at `location`, cloning `remote_url` into it if
/// there is no repository there yet.
pub fn ensure_mirror(
    location: &Path,
    remote_url: &str,
    credentials: Option<&Credentials>,
) -> Result<Repository, MirrorError> {
    match Repository::open(location) {
        Ok(repo) => {
            debug!("Opened existing mirror at {}", location.display());
            Ok(repo)
        }
        Err(err) if err.code() == ErrorCode::NotFound => {
            info!("Cloning {} into {}", remote_url, location.display());
            RepoBuilder::new()
                .bare(true)
                .fetch_options(fetch_options(credentials))
                .clone(remote_url, location)
                .map_err(|source| MirrorError::Clone {
                    url: remote_url.to_string(),
                    path: location.to_path_buf(),
                    source,
                })
        }
        Err(source) => Err(MirrorError::Open {
            path: location.to_path_buf(),
            source,
        }),
    }
}

/// Byte and object counts of one fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub received_objects: usize,
    pub received_bytes: usize,
}

/// Update the mirror from its remote. An up-to-date remote is a success.
pub fn fetch(repo: &Repository, credentials: Option<&Credentials>) -> Result<FetchSummary, MirrorError> {
    let mut remote = repo.find_remote(DEFAULT_REMOTE).map_err(MirrorError::Fetch)?;
    let mut options = fetch_options(credentials);
    remote
        .fetch(&[] as &[&str], Some(&mut options), Some("gitway: fetch"))
        .map_err(MirrorError::Fetch)?;

    let stats = remote.stats();
    Ok(FetchSummary {
        received_objects: stats.received_objects(),
        received_bytes: stats.received_bytes(),
    })
}

#[derive(Debug, Clone)]
enum SavedTarget {
    Direct(Oid),
    Symbolic(String),
}

#[derive(Debug, Clone)]
struct SavedRef {
    name: String,
    target: SavedTarget,
}

/// Remote-tracking references as they were before a reset
#[derive(Debug, Clone, Default)]
pub struct RemoteRefSnapshot {
    refs: Vec<SavedRef>,
}

impl RemoteRefSnapshot {
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Remove every remote-tracking reference from the mirror.
///
/// Returns what was removed so a failed refresh can put it back. If a
/// deletion fails midway the references removed so far are restored before
/// the error is returned.
pub fn reset_remote_refs(repo: &Repository) -> Result<RemoteRefSnapshot, MirrorError> {
    let mut snapshot = RemoteRefSnapshot::default();

    for reference in repo.references().map_err(MirrorError::Reset)? {
        let reference = reference.map_err(MirrorError::Reset)?;
        if !reference.is_remote() {
            continue;
        }
        let Some(name) = reference.name() else {
            continue;
        };
        let target = match (reference.target(), reference.symbolic_target()) {
            (Some(oid), _) => SavedTarget::Direct(oid),
            (None, Some(symbolic)) => SavedTarget::Symbolic(symbolic.to_string()),
            (None, None) => continue,
        };
        snapshot.refs.push(SavedRef {
            name: name.to_string(),
            target,
        });
    }

    for (idx, saved) in snapshot.refs.iter().enumerate() {
        let deleted = repo
            .find_reference(&saved.name)
            .and_then(|mut reference| reference.delete());
        if let Err(err) = deleted {
            let removed = RemoteRefSnapshot {
                refs: snapshot.refs[..idx].to_vec(),
            };
            restore_remote_refs(repo, &removed)?;
            return Err(MirrorError::Reset(err));
        }
    }

    debug!("Removed {} remote-tracking references", snapshot.len());
    Ok(snapshot)
}

/// Write back the references captured by [`reset_remote_refs`], replacing
/// whatever a partial fetch left in their place.
pub fn restore_remote_refs(repo: &Repository, snapshot: &RemoteRefSnapshot) -> Result<(), MirrorError> {
    // Direct refs first so symbolic ones resolve
    for saved in &snapshot.refs {
        if let SavedTarget::Direct(oid) = saved.target {
            repo.reference(&saved.name, oid, true, "gitway: restore")
                .map_err(MirrorError::Restore)?;
        }
    }
    for saved in &snapshot.refs {
        if let SavedTarget::Symbolic(target) = &saved.target {
            repo.reference_symbolic(&saved.name, target, true, "gitway: restore")
                .map_err(MirrorError::Restore)?;
        }
    }
    Ok(())
}
