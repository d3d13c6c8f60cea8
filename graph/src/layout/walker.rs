use anyhow::{Context, Result};
use std::collections::HashSet;

use crate::core::{GraphLink, GraphState};
use crate::query::TimeWindow;
use crate::source::{CommitRecord, HistorySource};

/// A commit on the walk stack and the index of its next unvisited parent
struct Frame {
    commit: CommitRecord,
    next_parent: usize,
}

impl Frame {
    fn new(commit: CommitRecord) -> Self {
        Self {
            commit,
            next_parent: 0,
        }
    }

    fn next_parent(&mut self) -> Option<String> {
        let parent = self.commit.parents.get(self.next_parent).cloned()?;
        self.next_parent += 1;
        Some(parent)
    }
}

/// Claims a branch's history inside a time window for that branch.
///
/// The walk is depth-first and post-order over an explicit stack: a commit
/// is recorded only after all of its eligible parents have been handled.
/// Parents already owned by another branch get a merge link instead of
/// being walked again, parents older than the window end the branch in its
/// placeholder node. Commits newer than the window are walked through but
/// never recorded.
pub struct AncestryWalker<'a, S: ?Sized> {
    source: &'a S,
    window: TimeWindow,
}

impl<'a, S: HistorySource + ?Sized> AncestryWalker<'a, S> {
    pub fn new(source: &'a S, window: TimeWindow) -> Self {
        Self { source, window }
    }

    /// Extend `state` with everything `branch` owns starting from `head`
    pub fn walk(&self, branch: &str, head: CommitRecord, state: &mut GraphState) -> Result<()> {
        if state.owner(&head.hash).is_some() || self.window.is_prehistoric(head.committer_time) {
            return Ok(());
        }

        // Commits currently on the stack, and future commits already walked through
        let mut open = HashSet::from([head.hash.clone()]);
        let mut passed = HashSet::new();
        let mut stack = vec![Frame::new(head)];

        while let Some(frame) = stack.last_mut() {
            match frame.next_parent() {
                Some(parent) => {
                    if open.contains(&parent) || passed.contains(&parent) {
                        continue;
                    }
                    let child = frame.commit.hash.clone();
                    let child_in_window = !self.window.is_future(frame.commit.committer_time);
                    if let Some(next) =
                        self.visit_parent(branch, &child, child_in_window, &parent, state)?
                    {
                        open.insert(next.hash.clone());
                        stack.push(Frame::new(next));
                    }
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    open.remove(&done.commit.hash);
                    if self.window.is_future(done.commit.committer_time) {
                        passed.insert(done.commit.hash);
                    } else {
                        state.claim(&done.commit.hash, branch, done.commit.committer_time);
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle one parent edge; returns the parent record if it must be walked
    fn visit_parent(
        &self,
        branch: &str,
        child: &str,
        child_in_window: bool,
        parent: &str,
        state: &mut GraphState,
    ) -> Result<Option<CommitRecord>> {
        match state.owner(parent).map(|owner| owner == branch) {
            Some(true) => return Ok(None),
            Some(false) => {
                if child_in_window {
                    state.push_link(GraphLink::merge(child, parent));
                }
                return Ok(None);
            }
            None => {}
        }

        let record = self
            .source
            .commit(parent)
            .with_context(|| format!("Failed to read parent {} of {}", parent, child))?;

        if self.window.is_prehistoric(record.committer_time) {
            if child_in_window {
                state.add_placeholder(branch);
            }
            return Ok(None);
        }

        Ok(Some(record))
    }
}
