use std::collections::BTreeSet;

use crate::core::GraphLink;

/// Ids referenced by any link, as source or target.
///
/// Owned commits between a branch's span ends stay in the node map but are
/// not part of this set.
pub fn relevant_nodes(links: &[GraphLink]) -> BTreeSet<String> {
    links
        .iter()
        .flat_map(|link| [link.source.clone(), link.target.clone()])
        .collect()
}
