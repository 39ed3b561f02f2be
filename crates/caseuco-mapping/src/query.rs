//! Read-only queries over one graph document.
//!
//! [`Graph`] indexes nodes by id once, so reference resolution is a hash
//! lookup. Relationship scans walk the relationship list; there is no
//! adjacency index.

use std::collections::HashMap;

use caseuco_core::{
  facet::{Facet, FacetKind, FacetShape},
  node::{Node, NodeId, NodeKind, NodeRef, Relationship, Trace},
};

use crate::relationship::is_containment;

// ─── Facet queries ───────────────────────────────────────────────────────────

pub fn first_facet_of_kind(trace: &Trace, kind: FacetKind) -> Option<&Facet> {
  trace.facets.iter().find(|f| f.kind() == kind)
}

/// Facets of `kind` in insertion order.
pub fn all_facets_of_kind(trace: &Trace, kind: FacetKind) -> Vec<&Facet> {
  trace.facets.iter().filter(|f| f.kind() == kind).collect()
}

/// The first facet of shape `T`, with its body.
pub fn first<T: FacetShape>(trace: &Trace) -> Option<(&Facet, &T)> {
  trace
    .facets
    .iter()
    .find_map(|f| f.shape::<T>().map(|body| (f, body)))
}

pub fn all<T: FacetShape>(trace: &Trace) -> Vec<(&Facet, &T)> {
  trace
    .facets
    .iter()
    .filter_map(|f| f.shape::<T>().map(|body| (f, body)))
    .collect()
}

// ─── Graph ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Graph<'a> {
  nodes:         &'a [Node],
  by_id:         HashMap<&'a NodeId, usize>,
  relationships: Vec<&'a Relationship>,
}

impl<'a> Graph<'a> {
  /// Index `nodes`. When two nodes share an id the first one is kept.
  pub fn new(nodes: &'a [Node]) -> Self {
    let mut by_id = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
      by_id.entry(node.id()).or_insert(index);
    }
    let relationships = nodes.iter().filter_map(Node::as_relationship).collect();
    Self {
      nodes,
      by_id,
      relationships,
    }
  }

  pub fn nodes(&self) -> &'a [Node] {
    self.nodes
  }

  pub fn node(&self, id: &NodeId) -> Option<&'a Node> {
    self.by_id.get(id).map(|&index| &self.nodes[index])
  }

  pub fn resolve(&self, reference: Option<&NodeRef>) -> Option<&'a Node> {
    self.node(&reference?.id)
  }

  /// The trace a reference points at.
  pub fn trace(&self, reference: Option<&NodeRef>) -> Option<&'a Trace> {
    self.resolve(reference)?.as_trace()
  }

  /// Sources of non-containment relationships that target `id`, optionally
  /// restricted to one node kind. Dangling sources are skipped.
  pub fn nodes_targeting(
    &self,
    id: &NodeId,
    kind: Option<NodeKind>,
  ) -> Vec<&'a Node> {
    self
      .links()
      .filter(|r| &r.target == id)
      .filter_map(|r| self.node(&r.source))
      .filter(|node| kind.is_none_or(|kind| node.kind() == kind))
      .collect()
  }

  /// Targets of non-containment relationships whose source is `id`.
  pub fn targets_of_source(&self, id: &NodeId) -> Vec<&'a NodeId> {
    self
      .links()
      .filter(|r| &r.source == id)
      .map(|r| &r.target)
      .collect()
  }

  /// The parent `id` is contained within, if the graph says so.
  pub fn containment_target(&self, id: &NodeId) -> Option<&'a NodeId> {
    self
      .relationships
      .iter()
      .find(|r| &r.source == id && is_containment(r))
      .map(|r| &r.target)
  }

  fn links(&self) -> impl Iterator<Item = &'a Relationship> + '_ {
    self
      .relationships
      .iter()
      .copied()
      .filter(|r| !is_containment(r))
  }
}

#[cfg(test)]
mod tests {
  use caseuco_core::{
    facet::{ApplicationFacet, DomainNameFacet, FacetBody, UrlFacet},
    node::{Assertion, CoreProperties},
  };

  use super::*;
  use crate::relationship::{emit_containment, link};

  fn url(value: &str) -> UrlFacet {
    UrlFacet {
      full_value: Some(value.into()),
      user_name:  None,
    }
  }

  #[test]
  fn facet_queries_keep_insertion_order() {
    let trace = Trace::new(NodeId::from("kb:t"))
      .with_facet(url("https://a.example"))
      .with_facet(DomainNameFacet {
        value: Some("a.example".into()),
      })
      .with_facet(url("https://b.example"));

    let Some(facet) = first_facet_of_kind(&trace, FacetKind::Url) else {
      panic!("expected a URL facet")
    };
    let FacetBody::Url(first_url) = &facet.body else {
      panic!("expected a URL body")
    };
    assert_eq!(first_url.full_value.as_deref(), Some("https://a.example"));

    let urls = all::<UrlFacet>(&trace);
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[1].1.full_value.as_deref(), Some("https://b.example"));
    assert_eq!(all_facets_of_kind(&trace, FacetKind::DomainName).len(), 1);
    assert!(first::<ApplicationFacet>(&trace).is_none());
  }

  #[test]
  fn first_node_wins_on_duplicate_ids() {
    let nodes = vec![
      Node::Trace(Trace::new(NodeId::from("kb:x"))),
      Node::Assertion(Assertion {
        id:        NodeId::from("kb:x"),
        core:      CoreProperties::default(),
        statement: None,
      }),
    ];
    let graph = Graph::new(&nodes);
    assert_eq!(
      graph.node(&NodeId::from("kb:x")).map(Node::kind),
      Some(NodeKind::Trace)
    );
  }

  #[test]
  fn relationship_queries_split_containment_from_links() {
    let primary = NodeId::from("kb:primary");
    let parent = NodeId::from("kb:parent");
    let satellite = NodeId::from("_:location");

    let mut nodes = vec![
      Node::Trace(Trace::new(primary.clone())),
      Node::Assertion(Assertion {
        id:        satellite.clone(),
        core:      CoreProperties::default(),
        statement: Some("seen".into()),
      }),
      Node::Relationship(link(&satellite, &primary)),
      Node::Relationship(link(&NodeId::from("_:gone"), &primary)),
    ];
    emit_containment(&mut nodes, &primary, &parent, true);
    let graph = Graph::new(&nodes);

    let sources = graph.nodes_targeting(&primary, None);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].id(), &satellite);
    assert!(
      graph
        .nodes_targeting(&primary, Some(NodeKind::Trace))
        .is_empty()
    );

    assert!(graph.targets_of_source(&primary).is_empty());
    assert_eq!(graph.targets_of_source(&satellite), vec![&primary]);
    assert_eq!(graph.containment_target(&primary), Some(&parent));
    assert_eq!(graph.containment_target(&satellite), None);
  }
}
