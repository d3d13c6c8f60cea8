use serde::Serialize;

use crate::source::RefKind;

/// Suffix of the synthetic node marking history beyond the window
const PLACEHOLDER_SUFFIX: &str = "-prehistoric";

/// Id of the boundary node for `branch`
pub fn placeholder_id(branch: &str) -> String {
    format!("{}{}", branch, PLACEHOLDER_SUFFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A real commit
    Commit,
    /// Boundary node standing in for history before the window
    Placeholder,
}

/// A reference pointing directly at a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    #[serde(rename = "ref")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RefKind,
}

/// A node in the simplified graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Committer time, 0 for placeholders
    pub timestamp: i64,
    /// Owning branch
    pub branch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<NodeRef>,
    /// Set when a branch head or tag points here
    pub important: bool,
    #[serde(skip)]
    pub kind: NodeKind,
}

impl GraphNode {
    pub fn commit(branch: impl Into<String>, timestamp: i64) -> Self {
        Self {
            timestamp,
            branch: branch.into(),
            references: Vec::new(),
            important: false,
            kind: NodeKind::Commit,
        }
    }

    pub fn placeholder(branch: impl Into<String>) -> Self {
        Self {
            timestamp: 0,
            branch: branch.into(),
            references: Vec::new(),
            important: false,
            kind: NodeKind::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == NodeKind::Placeholder
    }
}
