use serde::Serialize;

/// A directed link between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphLink {
    /// Newer end
    pub source: String,
    /// Older end
    pub target: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Commit on one branch to a parent owned by another branch
    Merge,
    /// Oldest owned commit to the branch placeholder
    Boundary,
    /// Newest owned commit to oldest owned commit
    Spine,
}

impl GraphLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    pub fn merge(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, LinkKind::Merge)
    }

    pub fn boundary(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, LinkKind::Boundary)
    }

    pub fn spine(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, LinkKind::Spine)
    }
}
