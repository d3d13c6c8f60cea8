pub mod builder;
pub mod core;
pub mod decor;
pub mod git_backend;
pub mod layout;
pub mod query;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::GraphBuilder;
pub use core::{
    classify_priority, placeholder_id, BranchDescriptor, Graph, GraphLink, GraphNode, GraphState,
    LinkKind, NodeKind, NodeRef,
};
pub use git_backend::GitHistory;
pub use query::TimeWindow;
pub use source::{is_missing_commit, CommitRecord, HistorySource, MissingCommit, RefKind, Reference};
