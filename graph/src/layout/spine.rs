use std::collections::HashMap;

use crate::core::{placeholder_id, BranchDescriptor, GraphLink, GraphState};

/// Newest and oldest commit a branch owns, as `(timestamp, id)`
#[derive(Debug)]
struct Span<'a> {
    newest: (i64, &'a str),
    oldest: (i64, &'a str),
    count: usize,
}

impl<'a> Span<'a> {
    fn new(timestamp: i64, id: &'a str) -> Self {
        Self {
            newest: (timestamp, id),
            oldest: (timestamp, id),
            count: 1,
        }
    }

    fn extend(&mut self, timestamp: i64, id: &'a str) {
        self.newest = self.newest.max((timestamp, id));
        self.oldest = self.oldest.min((timestamp, id));
        self.count += 1;
    }
}

/// Collapse each branch's owned run into at most two links.
///
/// For every branch owning a real commit: `oldest -> placeholder` when the
/// branch reached the window boundary, and `newest -> oldest` when it owns
/// more than one commit. Timestamp ties are broken by id.
pub fn link_spines(state: &mut GraphState, branches: &[BranchDescriptor]) {
    let mut spans: HashMap<&str, Span> = HashMap::new();
    for (id, node) in state.nodes() {
        if node.is_placeholder() {
            continue;
        }
        spans
            .entry(node.branch.as_str())
            .and_modify(|span| span.extend(node.timestamp, id))
            .or_insert_with(|| Span::new(node.timestamp, id));
    }

    let mut links = Vec::new();
    for branch in branches {
        let Some(span) = spans.get(branch.name.as_str()) else {
            continue;
        };
        if state.has_placeholder(&branch.name) {
            links.push(GraphLink::boundary(span.oldest.1, placeholder_id(&branch.name)));
        }
        if span.count > 1 {
            links.push(GraphLink::spine(span.newest.1, span.oldest.1));
        }
    }

    for link in links {
        state.push_link(link);
    }
}
