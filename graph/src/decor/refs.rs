use std::collections::BTreeMap;

use crate::core::{GraphNode, NodeRef};
use crate::source::Reference;

/// Annotate every node a reference points at directly and mark it important.
///
/// Independent of ownership and relevance, so a tag on a commit inside a
/// branch span still shows up. Returns the number of annotations added.
pub fn attach_references(nodes: &mut BTreeMap<String, GraphNode>, references: &[Reference]) -> usize {
    let mut attached = 0;
    for reference in references {
        if let Some(node) = nodes.get_mut(&reference.target) {
            node.references.push(NodeRef {
                name: reference.name.clone(),
                kind: reference.kind,
            });
            node.important = true;
            attached += 1;
        }
    }
    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RefKind;

    #[test]
    fn test_attach_tag_and_branch() {
        let mut nodes = BTreeMap::new();
        nodes.insert("c2".to_string(), GraphNode::commit("master", 200));
        nodes.insert("c3".to_string(), GraphNode::commit("master", 300));

        let references = vec![
            Reference::branch("origin/master", "c3"),
            Reference::tag("v1.0", "c2"),
            Reference::tag("v0.9", "c1"),
        ];
        let attached = attach_references(&mut nodes, &references);

        assert_eq!(attached, 2);
        assert!(nodes["c2"].important);
        assert_eq!(
            nodes["c2"].references,
            vec![NodeRef {
                name: "v1.0".to_string(),
                kind: RefKind::Tag
            }]
        );
        assert_eq!(nodes["c3"].references[0].kind, RefKind::RemoteBranch);
    }

    #[test]
    fn test_multiple_refs_on_one_node() {
        let mut nodes = BTreeMap::new();
        nodes.insert("c1".to_string(), GraphNode::commit("master", 1));
        let references = vec![Reference::tag("a", "c1"), Reference::tag("b", "c1")];

        attach_references(&mut nodes, &references);
        let names: Vec<_> = nodes["c1"].references.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_untouched_nodes_stay_unimportant() {
        let mut nodes = BTreeMap::new();
        nodes.insert("c1".to_string(), GraphNode::commit("master", 1));
        attach_references(&mut nodes, &[]);
        assert!(!nodes["c1"].important);
    }
}
