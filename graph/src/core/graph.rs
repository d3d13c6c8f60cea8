use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::branch::BranchDescriptor;
use super::edge::GraphLink;
use super::node::GraphNode;

/// The document handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    /// Branches in walk order
    pub branches: Vec<BranchDescriptor>,
    pub nodes: BTreeMap<String, GraphNode>,
    pub links: Vec<GraphLink>,
    /// Ids appearing in at least one link
    pub relevant: BTreeSet<String>,
    /// Lower window bound, unix seconds
    pub mintime: i64,
    /// Upper window bound, unix seconds
    pub maxtime: i64,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Nodes a branch head or tag points at
    pub fn important(&self) -> impl Iterator<Item = (&String, &GraphNode)> {
        self.nodes.iter().filter(|(_, node)| node.important)
    }
}
