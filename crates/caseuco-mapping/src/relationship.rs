//! Relationship nodes: containment edges and the plain links assemblers use
//! to hang satellites off a primary node.

use caseuco_core::node::{CoreProperties, Node, NodeId, Relationship};

/// `kindOfRelationship` of the child → parent edge.
pub const CONTAINED_WITHIN: &str = "contained-within";

/// An unlabelled, undirected link from `source` to `target`.
pub fn link(source: &NodeId, target: &NodeId) -> Relationship {
  Relationship {
    id:                   NodeId::blank(),
    core:                 CoreProperties::default(),
    source:               source.clone(),
    target:               target.clone(),
    kind_of_relationship: None,
    is_directional:       false,
  }
}

/// Append a `contained-within` edge from `child` to `parent` when `enabled`.
pub fn emit_containment(
  output: &mut Vec<Node>,
  child: &NodeId,
  parent: &NodeId,
  enabled: bool,
) {
  if !enabled {
    return;
  }
  output.push(Node::Relationship(Relationship {
    kind_of_relationship: Some(CONTAINED_WITHIN.to_string()),
    is_directional: true,
    ..link(child, parent)
  }));
}

/// Whether `relationship` is a child → parent containment edge. The label
/// alone is not enough: an undirected edge has no child end.
pub fn is_containment(relationship: &Relationship) -> bool {
  relationship.is_directional
    && relationship
      .kind_of_relationship
      .as_deref()
      .is_some_and(|kind| kind.eq_ignore_ascii_case(CONTAINED_WITHIN))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn containment_edge_points_child_to_parent() {
    let mut output = Vec::new();
    let child = NodeId::from("kb:child");
    let parent = NodeId::from("kb:parent");
    emit_containment(&mut output, &child, &parent, true);

    let [Node::Relationship(edge)] = output.as_slice() else {
      panic!("expected exactly one relationship")
    };
    assert_eq!(edge.source, child);
    assert_eq!(edge.target, parent);
    assert!(edge.id.is_blank());
    assert!(is_containment(edge));
  }

  #[test]
  fn disabled_containment_emits_nothing() {
    let mut output = Vec::new();
    emit_containment(
      &mut output,
      &NodeId::from("kb:child"),
      &NodeId::from("kb:parent"),
      false,
    );
    assert!(output.is_empty());
  }

  #[test]
  fn plain_links_are_not_containment() {
    let edge = link(&NodeId::from("_:a"), &NodeId::from("kb:b"));
    assert!(!is_containment(&edge));
  }

  #[test]
  fn containment_label_ignores_case() {
    let mut edge = link(&NodeId::from("kb:a"), &NodeId::from("kb:b"));
    edge.kind_of_relationship = Some("Contained-Within".into());
    edge.is_directional = true;
    assert!(is_containment(&edge));
  }

  #[test]
  fn undirected_containment_label_is_not_containment() {
    let mut edge = link(&NodeId::from("kb:a"), &NodeId::from("kb:b"));
    edge.kind_of_relationship = Some(CONTAINED_WITHIN.into());
    assert!(!is_containment(&edge));

    edge.is_directional = true;
    assert!(is_containment(&edge));
  }
}
