use serde::Serialize;
use std::cmp::Ordering;

use super::priority::classify_priority;
use crate::source::CommitRecord;

/// A remote branch taking part in a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchDescriptor {
    pub name: String,
    /// Priority class 0..=5, see [`classify_priority`]
    pub priority: u8,
    /// Committer time of the head commit
    #[serde(rename = "lastcommit")]
    pub last_commit: i64,
    /// Author of the head commit
    #[serde(rename = "lastcommitter")]
    pub last_committer: String,
    #[serde(skip)]
    pub head: String,
}

impl BranchDescriptor {
    pub fn from_head(name: impl Into<String>, head: &CommitRecord) -> Self {
        let name = name.into();
        Self {
            priority: classify_priority(&name),
            name,
            last_commit: head.committer_time,
            last_committer: head.author.clone(),
            head: head.hash.clone(),
        }
    }

    /// Priority ascending, then most recent first, then name
    pub fn walk_order(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.last_commit.cmp(&self.last_commit))
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str, last_commit: i64) -> BranchDescriptor {
        let head = CommitRecord {
            hash: format!("{}-head", name),
            parents: Vec::new(),
            committer_time: last_commit,
            author: "Tester".to_string(),
        };
        BranchDescriptor::from_head(name, &head)
    }

    #[test]
    fn test_from_head() {
        let b = branch("origin/release/1.2", 42);
        assert_eq!(b.priority, 2);
        assert_eq!(b.last_commit, 42);
        assert_eq!(b.last_committer, "Tester");
        assert_eq!(b.head, "origin/release/1.2-head");
    }

    #[test]
    fn test_walk_order_priority_then_recency() {
        let mut branches = vec![
            branch("origin/feature/old", 10),
            branch("origin/feature/new", 20),
            branch("origin/develop", 5),
            branch("origin/master", 1),
            branch("origin/misc", 100),
        ];
        branches.sort_by(BranchDescriptor::walk_order);
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "origin/master",
                "origin/develop",
                "origin/feature/new",
                "origin/feature/old",
                "origin/misc",
            ]
        );
    }

    #[test]
    fn test_walk_order_ties_by_name() {
        let mut branches = vec![branch("origin/b", 7), branch("origin/a", 7)];
        branches.sort_by(BranchDescriptor::walk_order);
        assert_eq!(branches[0].name, "origin/a");
    }
}
