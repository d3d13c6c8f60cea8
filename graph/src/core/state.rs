use std::collections::BTreeMap;

use super::edge::GraphLink;
use super::node::{placeholder_id, GraphNode};

/// Node and link state threaded through every branch walk of one build.
///
/// The node map doubles as the ownership map: the branch recorded on a
/// commit node is its owner, and ownership is never reassigned.
#[derive(Debug, Default, Clone)]
pub struct GraphState {
    nodes: BTreeMap<String, GraphNode>,
    links: Vec<GraphLink>,
}

/// Point to roll a failed branch walk back to
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    links: usize,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Branch owning `id`, if any
    pub fn owner(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|node| node.branch.as_str())
    }

    pub fn is_owned_by(&self, id: &str, branch: &str) -> bool {
        self.owner(id) == Some(branch)
    }

    /// Record `id` as a commit owned by `branch`. First claim wins; returns
    /// false if the commit already had an owner.
    pub fn claim(&mut self, id: &str, branch: &str, timestamp: i64) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        self.nodes
            .insert(id.to_string(), GraphNode::commit(branch, timestamp));
        true
    }

    /// Record the boundary node for `branch`
    pub fn add_placeholder(&mut self, branch: &str) {
        self.nodes
            .entry(placeholder_id(branch))
            .or_insert_with(|| GraphNode::placeholder(branch));
    }

    pub fn has_placeholder(&self, branch: &str) -> bool {
        self.nodes.contains_key(&placeholder_id(branch))
    }

    /// Record a link. Merge links are pushed before their source commit is
    /// claimed, so endpoints are only guaranteed to exist once a walk ends.
    pub fn push_link(&mut self, link: GraphLink) {
        self.links.push(link);
    }

    pub fn nodes(&self) -> &BTreeMap<String, GraphNode> {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            links: self.links.len(),
        }
    }

    /// Drop everything `branch` recorded since `checkpoint`.
    ///
    /// Only valid for the branch currently being walked: its nodes can only
    /// have been claimed after the checkpoint.
    pub fn rollback(&mut self, checkpoint: Checkpoint, branch: &str) {
        self.links.truncate(checkpoint.links);
        self.nodes.retain(|_, node| node.branch != branch);
    }

    pub fn into_parts(self) -> (BTreeMap<String, GraphNode>, Vec<GraphLink>) {
        (self.nodes, self.links)
    }
}
