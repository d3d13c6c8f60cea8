use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

/// What a discovered reference points from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RefKind {
    /// Remote-tracking branch such as `origin/master`
    #[serde(rename = "branch")]
    RemoteBranch,
    #[serde(rename = "tag")]
    Tag,
}

/// A reference as seen in the mirror at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Short name (`origin/feature/x`, `v1.0`)
    pub name: String,
    pub kind: RefKind,
    /// Hash of the commit the reference resolves to
    pub target: String,
}

impl Reference {
    pub fn branch(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RefKind::RemoteBranch,
            target: target.into(),
        }
    }

    pub fn tag(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RefKind::Tag,
            target: target.into(),
        }
    }
}

/// Read-only commit metadata owned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    /// Parent hashes in commit order
    pub parents: Vec<String>,
    /// Committer time, unix seconds
    pub committer_time: i64,
    pub author: String,
}

/// A commit the store does not have.
///
/// Providers return this for unknown hashes so the builder can tell a
/// dangling reference apart from a store that cannot be read at all.
#[derive(Debug, Error)]
#[error("Commit {0} not found")]
pub struct MissingCommit(pub String);

/// Whether an error chain bottoms out in a [`MissingCommit`]
pub fn is_missing_commit(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<MissingCommit>())
}

/// Read access to a commit history store.
///
/// The graph builder never touches the storage format itself; everything it
/// knows about the history comes through this trait.
pub trait HistorySource {
    /// Enumerate remote branches and tags
    fn references(&self) -> Result<Vec<Reference>>;

    /// Read one commit by hash. Unknown hashes yield [`MissingCommit`].
    fn commit(&self, hash: &str) -> Result<CommitRecord>;
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn references(&self) -> Result<Vec<Reference>> {
        (**self).references()
    }

    fn commit(&self, hash: &str) -> Result<CommitRecord> {
        (**self).commit(hash)
    }
}
