use anyhow::{Context, Result};
use git2::{ErrorCode, Oid, ReferenceType, Repository};
use std::path::Path;
use tracing::warn;

use crate::source::{CommitRecord, HistorySource, MissingCommit, RefKind, Reference};

/// [`HistorySource`] over a git repository
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path.as_ref())
            .with_context(|| format!("Failed to open repository at {}", path.as_ref().display()))?;
        Ok(Self { repo })
    }
}

impl HistorySource for GitHistory {
    /// Remote-tracking branches and tags, by short name and sorted by it.
    ///
    /// Symbolic refs such as `origin/HEAD` are skipped and annotated tags are
    /// peeled to the commit they tag.
    fn references(&self) -> Result<Vec<Reference>> {
        let mut refs = Vec::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            if reference.kind() == Some(ReferenceType::Symbolic) {
                continue;
            }

            let kind = if reference.is_remote() {
                RefKind::RemoteBranch
            } else if reference.is_tag() {
                RefKind::Tag
            } else {
                continue;
            };

            let Some(name) = reference.shorthand() else {
                continue;
            };
            if kind == RefKind::RemoteBranch && name.ends_with("/HEAD") {
                continue;
            }

            match reference.peel_to_commit() {
                Ok(commit) => refs.push(Reference {
                    name: name.to_string(),
                    kind,
                    target: commit.id().to_string(),
                }),
                Err(err) => warn!("Ignoring reference {}: {}", name, err.message()),
            }
        }

        refs.sort_by(|a, b| a.name.cmp(&b.name).then(a.kind.cmp(&b.kind)));
        Ok(refs)
    }

    fn commit(&self, hash: &str) -> Result<CommitRecord> {
        let oid = Oid::from_str(hash).map_err(|_| MissingCommit(hash.to_string()))?;
        let commit = match self.repo.find_commit(oid) {
            Ok(commit) => commit,
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Err(MissingCommit(hash.to_string()).into())
            }
            Err(err) => return Err(err).with_context(|| format!("Failed to read commit {}", hash)),
        };

        let record = CommitRecord {
            hash: hash.to_string(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
            committer_time: commit.committer().when().seconds(),
            author: commit.author().name().unwrap_or("Unknown").to_string(),
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, TimeWindow};
    use git2::{Commit, Signature, Time};
    use tempfile::TempDir;

    fn create_test_repo() -> Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        let repo = Repository::init(dir.path())?;
        Ok((dir, repo))
    }

    /// Commit an empty tree at a fixed time
    fn commit_at(repo: &Repository, message: &str, parents: &[&Commit], seconds: i64) -> Result<Oid> {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        Ok(repo.commit(None, &sig, &sig, message, &tree, parents)?)
    }

    fn remote_branch(repo: &Repository, name: &str, oid: Oid) -> Result<()> {
        repo.reference(&format!("refs/remotes/origin/{}", name), oid, true, "test")?;
        Ok(())
    }

    #[test]
    fn test_references_by_kind() -> Result<()> {
        let (_dir, repo) = create_test_repo()?;
        let c1 = commit_at(&repo, "first", &[], 1_000)?;
        let first = repo.find_commit(c1)?;
        let c2 = commit_at(&repo, "second", &[&first], 2_000)?;

        remote_branch(&repo, "master", c2)?;
        remote_branch(&repo, "feature/x", c1)?;
        repo.reference_symbolic("refs/remotes/origin/HEAD", "refs/remotes/origin/master", true, "test")?;
        repo.reference("refs/heads/local", c2, true, "test")?;
        repo.tag_lightweight("v0.1", first.as_object(), false)?;
        let sig = Signature::new("Tagger", "tag@example.com", &Time::new(3_000, 0))?;
        repo.tag("v1.0", repo.find_commit(c2)?.as_object(), &sig, "release", false)?;
        drop(first);

        let history = GitHistory::new(repo);
        let refs = history.references()?;

        assert_eq!(
            refs,
            vec![
                Reference::branch("origin/feature/x", c1.to_string()),
                Reference::branch("origin/master", c2.to_string()),
                Reference::tag("v0.1", c1.to_string()),
                // Annotated tag peeled to its commit
                Reference::tag("v1.0", c2.to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_commit_record() -> Result<()> {
        let (_dir, repo) = create_test_repo()?;
        let c1 = commit_at(&repo, "first", &[], 1_000)?;
        let first = repo.find_commit(c1)?;
        let c2 = commit_at(&repo, "second", &[&first], 2_000)?;
        let second = repo.find_commit(c2)?;
        let merge = commit_at(&repo, "merge", &[&second, &first], 3_000)?;
        drop(second);
        drop(first);

        let history = GitHistory::new(repo);
        let record = history.commit(&merge.to_string())?;
        assert_eq!(record.hash, merge.to_string());
        assert_eq!(record.parents, vec![c2.to_string(), c1.to_string()]);
        assert_eq!(record.committer_time, 3_000);
        assert_eq!(record.author, "Test User");

        for hash in ["not-a-hash".to_string(), "0".repeat(40)] {
            let err = history.commit(&hash).unwrap_err();
            assert!(err.is::<MissingCommit>(), "{:#}", err);
        }
        Ok(())
    }

    #[test]
    fn test_build_from_repository() -> Result<()> {
        let (dir, repo) = create_test_repo()?;
        let c1 = commit_at(&repo, "c1", &[], 100)?;
        let first = repo.find_commit(c1)?;
        let c2 = commit_at(&repo, "c2", &[&first], 200)?;
        let second = repo.find_commit(c2)?;
        let c3 = commit_at(&repo, "c3", &[&second], 300)?;
        remote_branch(&repo, "master", c3)?;
        repo.tag_lightweight("v1.0", second.as_object(), false)?;
        drop(second);
        drop(first);
        drop(repo);

        let history = GitHistory::open(dir.path())?;
        let graph = GraphBuilder::new(history).build(TimeWindow::new(150, 1_000))?;

        assert_eq!(graph.nodes.len(), 3);
        assert!(graph.nodes.contains_key("origin/master-prehistoric"));
        assert!(!graph.nodes.contains_key(&c1.to_string()));
        assert!(graph.nodes[&c2.to_string()].important);
        assert_eq!(graph.relevant.len(), 3);
        Ok(())
    }
}
