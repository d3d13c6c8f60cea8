//! In-memory history used by the unit tests.

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::source::{CommitRecord, HistorySource, MissingCommit, Reference};

#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    commits: HashMap<String, CommitRecord>,
    references: Vec<Reference>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents and committer time
    pub fn commit(mut self, hash: &str, parents: &[&str], time: i64) -> Self {
        self.commits.insert(
            hash.to_string(),
            CommitRecord {
                hash: hash.to_string(),
                parents: parents.iter().map(|p| p.to_string()).collect(),
                committer_time: time,
                author: format!("author-of-{}", hash),
            },
        );
        self
    }

    pub fn branch(mut self, name: &str, head: &str) -> Self {
        self.references.push(Reference::branch(name, head));
        self
    }

    pub fn tag(mut self, name: &str, target: &str) -> Self {
        self.references.push(Reference::tag(name, target));
        self
    }

    pub fn record(&self, hash: &str) -> CommitRecord {
        self.commits[hash].clone()
    }
}

impl HistorySource for MemoryHistory {
    fn references(&self) -> Result<Vec<Reference>> {
        Ok(self.references.clone())
    }

    fn commit(&self, hash: &str) -> Result<CommitRecord> {
        self.commits
            .get(hash)
            .cloned()
            .ok_or_else(|| MissingCommit(hash.to_string()).into())
    }
}

/// References list fine but every commit read fails as if the store broke
pub struct CorruptHistory(pub MemoryHistory);

impl HistorySource for CorruptHistory {
    fn references(&self) -> Result<Vec<Reference>> {
        self.0.references()
    }

    fn commit(&self, hash: &str) -> Result<CommitRecord> {
        match HistorySource::commit(&self.0, hash) {
            Ok(record) if record.parents.is_empty() => Err(anyhow!("object database error reading {}", hash)),
            other => other,
        }
    }
}

/// History whose reference listing always fails
pub struct UnreachableHistory;

impl HistorySource for UnreachableHistory {
    fn references(&self) -> Result<Vec<Reference>> {
        Err(anyhow!("provider unreachable"))
    }

    fn commit(&self, hash: &str) -> Result<CommitRecord> {
        Err(anyhow!("provider unreachable while reading {}", hash))
    }
}
