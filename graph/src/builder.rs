use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::{BranchDescriptor, Graph, GraphState};
use crate::decor::attach_references;
use crate::layout::{link_spines, AncestryWalker};
use crate::query::{relevant_nodes, TimeWindow};
use crate::source::{is_missing_commit, CommitRecord, HistorySource, RefKind, Reference};

/// Builds the simplified graph for one time window
pub struct GraphBuilder<S> {
    source: S,
}

impl<S: HistorySource> GraphBuilder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run a full build: discover, order, walk, link, filter, annotate.
    ///
    /// A branch whose history points at a missing commit is dropped and the
    /// rest of the graph is kept. Any other provider failure fails the build.
    pub fn build(&self, window: TimeWindow) -> Result<Graph> {
        let references = self
            .source
            .references()
            .context("Failed to list references")?;

        let mut heads = self.discover_branches(&references, window)?;
        heads.sort_by(|(a, _), (b, _)| a.walk_order(b));

        let walker = AncestryWalker::new(&self.source, window);
        let mut state = GraphState::new();
        let mut branches = Vec::with_capacity(heads.len());
        for (branch, head) in heads {
            let checkpoint = state.checkpoint();
            if let Err(err) = walker.walk(&branch.name, head, &mut state) {
                if !is_missing_commit(&err) {
                    return Err(err.context(format!("Failed to walk branch {}", branch.name)));
                }
                warn!("Skipping branch {}: {:#}", branch.name, err);
                state.rollback(checkpoint, &branch.name);
                continue;
            }
            branches.push(branch);
        }

        link_spines(&mut state, &branches);
        let (mut nodes, links) = state.into_parts();
        let relevant = relevant_nodes(&links);
        let annotated = attach_references(&mut nodes, &references);

        debug!(
            "Built graph: {} branches, {} nodes, {} links, {} relevant, {} references attached",
            branches.len(),
            nodes.len(),
            links.len(),
            relevant.len(),
            annotated
        );

        Ok(Graph {
            branches,
            nodes,
            links,
            relevant,
            mintime: window.after,
            maxtime: window.before,
        })
    }

    /// Remote branches whose head is not older than the window, with their
    /// head commits. Heads missing from the store are skipped.
    fn discover_branches(
        &self,
        references: &[Reference],
        window: TimeWindow,
    ) -> Result<Vec<(BranchDescriptor, CommitRecord)>> {
        let mut heads = Vec::new();
        for reference in references.iter().filter(|r| r.kind == RefKind::RemoteBranch) {
            let head = match self.source.commit(&reference.target) {
                Ok(head) => head,
                Err(err) if !is_missing_commit(&err) => {
                    return Err(err.context(format!("Failed to read head of {}", reference.name)))
                }
                Err(err) => {
                    warn!("Skipping branch {}: {:#}", reference.name, err);
                    continue;
                }
            };
            if window.is_prehistoric(head.committer_time) {
                continue;
            }
            heads.push((BranchDescriptor::from_head(&reference.name, &head), head));
        }
        Ok(heads)
    }
}
