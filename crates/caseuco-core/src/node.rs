//! The JSON-LD object graph: node identity, node kinds, and the document
//! envelope.
//!
//! Every node serialises as one JSON object carrying `@id` and `@type`.
//! Cross-node links are [`NodeRef`]s (`{"@id": …}`) and are resolved by
//! looking the id up in the same graph, never by ownership.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;
use uuid::Uuid;

use crate::{facet::Facet, record::RecordId};

/// Namespace for durable node ids derived from record ids.
const RECORD_NAMESPACE: Uuid =
  Uuid::from_u128(0x3c0f_6a52_8d1e_4b7a_9e55_c2d4_1f08_a6b3);

// ─── Identity ────────────────────────────────────────────────────────────────

/// A graph node identifier.
///
/// Blank ids (`_:` prefix) have meaning only inside one export or import
/// call. Durable ids are derived from a record id and are stable across calls.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
  pub const BLANK_PREFIX: &'static str = "_:";

  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  /// A fresh call-local id.
  pub fn blank() -> Self {
    Self(format!("{}{}", Self::BLANK_PREFIX, Uuid::new_v4()))
  }

  /// The durable id of the node exported for `record`.
  pub fn for_record(record: RecordId) -> Self {
    let uuid = Uuid::new_v5(&RECORD_NAMESPACE, record.0.to_string().as_bytes());
    Self(format!("kb:{uuid}"))
  }

  pub fn is_blank(&self) -> bool {
    self.0.starts_with(Self::BLANK_PREFIX)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for NodeId {
  fn from(id: &str) -> Self {
    Self(id.to_string())
  }
}

/// A soft reference to another node in the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
  #[serde(rename = "@id")]
  pub id: NodeId,
}

impl From<NodeId> for NodeRef {
  fn from(id: NodeId) -> Self {
    Self { id }
  }
}

impl From<&NodeId> for NodeRef {
  fn from(id: &NodeId) -> Self {
    Self { id: id.clone() }
  }
}

// ─── Shared properties ───────────────────────────────────────────────────────

/// Properties common to every node and every facet.
///
/// Timestamps stay ISO-8601 strings on the graph side; conversion to epoch
/// seconds happens in the mapping layer so that an unparsable value can be
/// dropped there instead of failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreProperties {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tag:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_time:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub modified_time: Option<String>,
}

impl CoreProperties {
  pub fn named(name: Option<String>) -> Self {
    Self {
      name,
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

// ─── Node kinds ──────────────────────────────────────────────────────────────

/// A piece of evidence: an ordered list of facets.
///
/// Facet order is insertion order and is meaningful; several shapes are
/// told apart by position alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
  #[serde(rename = "@id")]
  pub id:     NodeId,
  #[serde(flatten)]
  pub core:   CoreProperties,
  #[serde(rename = "hasPropertyBundle", default)]
  pub facets: Vec<Facet>,
}

impl Trace {
  pub fn new(id: NodeId) -> Self {
    Self {
      id,
      core: CoreProperties::default(),
      facets: Vec::new(),
    }
  }

  pub fn with_facet(mut self, facet: impl Into<Facet>) -> Self {
    self.facets.push(facet.into());
    self
  }
}

/// A named claim with a free-text statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
  #[serde(rename = "@id")]
  pub id:        NodeId,
  #[serde(flatten)]
  pub core:      CoreProperties,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub statement: Option<String>,
}

/// Something that happened; arguments attach through relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
  #[serde(rename = "@id")]
  pub id:         NodeId,
  #[serde(flatten)]
  pub core:       CoreProperties,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_time:   Option<String>,
}

/// A directed, optionally labelled edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
  #[serde(rename = "@id")]
  pub id:                   NodeId,
  #[serde(flatten)]
  pub core:                 CoreProperties,
  pub source:               NodeId,
  pub target:               NodeId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind_of_relationship: Option<String>,
  #[serde(default)]
  pub is_directional:       bool,
}

/// An identity, person or organisation; only the shared properties apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
  #[serde(rename = "@id")]
  pub id:   NodeId,
  #[serde(flatten)]
  pub core: CoreProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  #[serde(rename = "@id")]
  pub id:   NodeId,
  #[serde(flatten)]
  pub core: CoreProperties,
}

/// Free-form tags attached to other nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
  #[serde(rename = "@id")]
  pub id:     NodeId,
  #[serde(flatten)]
  pub core:   CoreProperties,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub object: Vec<NodeRef>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags:   Vec<String>,
}

/// A graph node. The variant name is the `@type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(NodeKind), derive(Hash, strum::Display))]
#[serde(tag = "@type")]
pub enum Node {
  Trace(Trace),
  Assertion(Assertion),
  Action(Action),
  Relationship(Relationship),
  Identity(Identity),
  Person(Identity),
  Organization(Identity),
  Location(Location),
  Annotation(Annotation),
}

impl Node {
  pub fn id(&self) -> &NodeId {
    match self {
      Self::Trace(n) => &n.id,
      Self::Assertion(n) => &n.id,
      Self::Action(n) => &n.id,
      Self::Relationship(n) => &n.id,
      Self::Identity(n) | Self::Person(n) | Self::Organization(n) => &n.id,
      Self::Location(n) => &n.id,
      Self::Annotation(n) => &n.id,
    }
  }

  pub fn kind(&self) -> NodeKind {
    NodeKind::from(self)
  }

  pub fn core(&self) -> &CoreProperties {
    match self {
      Self::Trace(n) => &n.core,
      Self::Assertion(n) => &n.core,
      Self::Action(n) => &n.core,
      Self::Relationship(n) => &n.core,
      Self::Identity(n) | Self::Person(n) | Self::Organization(n) => &n.core,
      Self::Location(n) => &n.core,
      Self::Annotation(n) => &n.core,
    }
  }

  pub fn as_trace(&self) -> Option<&Trace> {
    match self {
      Self::Trace(t) => Some(t),
      _ => None,
    }
  }

  pub fn as_assertion(&self) -> Option<&Assertion> {
    match self {
      Self::Assertion(a) => Some(a),
      _ => None,
    }
  }

  pub fn as_action(&self) -> Option<&Action> {
    match self {
      Self::Action(a) => Some(a),
      _ => None,
    }
  }

  pub fn as_relationship(&self) -> Option<&Relationship> {
    match self {
      Self::Relationship(r) => Some(r),
      _ => None,
    }
  }
}

impl From<Trace> for Node {
  fn from(trace: Trace) -> Self {
    Self::Trace(trace)
  }
}

impl From<Assertion> for Node {
  fn from(assertion: Assertion) -> Self {
    Self::Assertion(assertion)
  }
}

impl From<Action> for Node {
  fn from(action: Action) -> Self {
    Self::Action(action)
  }
}

impl From<Relationship> for Node {
  fn from(relationship: Relationship) -> Self {
    Self::Relationship(relationship)
  }
}

// ─── Document envelope ───────────────────────────────────────────────────────

/// A JSON-LD document: context plus the flat node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBundle {
  #[serde(rename = "@context")]
  pub context: serde_json::Value,
  #[serde(rename = "@graph")]
  pub graph:   Vec<Node>,
}

impl CaseBundle {
  pub fn new(graph: Vec<Node>) -> Self {
    Self {
      context: serde_json::json!({
        "@vocab": "https://ontology.unifiedcyberontology.org/uco/core/",
        "kb": "http://example.org/kb/",
      }),
      graph,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::facet::{FacetBody, UrlFacet};

  #[test]
  fn blank_ids_are_fresh() {
    let a = NodeId::blank();
    let b = NodeId::blank();
    assert!(a.is_blank());
    assert_ne!(a, b);
  }

  #[test]
  fn durable_ids_are_stable() {
    let a = NodeId::for_record(RecordId(42));
    assert!(!a.is_blank());
    assert!(a.as_str().starts_with("kb:"));
    assert_eq!(a, NodeId::for_record(RecordId(42)));
    assert_ne!(a, NodeId::for_record(RecordId(43)));
  }

  #[test]
  fn trace_wire_shape() {
    let mut trace = Trace::new(NodeId::from("kb:1")).with_facet(FacetBody::Url(
      UrlFacet {
        full_value: Some("https://example.com".into()),
        user_name:  None,
      },
    ));
    trace.core.created_time = Some("2020-01-01T00:00:00Z".into());

    let json = serde_json::to_value(Node::Trace(trace)).unwrap();
    assert_eq!(json["@type"], "Trace");
    assert_eq!(json["@id"], "kb:1");
    assert_eq!(json["createdTime"], "2020-01-01T00:00:00Z");
    assert_eq!(json["hasPropertyBundle"][0]["@type"], "URL");
    assert_eq!(
      json["hasPropertyBundle"][0]["fullValue"],
      "https://example.com"
    );
    assert!(json.get("name").is_none());
  }

  #[test]
  fn relationship_round_trips() {
    let node = Node::Relationship(Relationship {
      id:                   NodeId::blank(),
      core:                 CoreProperties::default(),
      source:               NodeId::from("kb:child"),
      target:               NodeId::from("kb:parent"),
      kind_of_relationship: Some("contained-within".into()),
      is_directional:       true,
    });

    let json = serde_json::to_string(&node).unwrap();
    assert!(json.contains("\"kindOfRelationship\":\"contained-within\""));
    assert!(json.contains("\"isDirectional\":true"));

    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
    assert_eq!(back.kind(), NodeKind::Relationship);
  }

  #[test]
  fn person_and_identity_share_a_shape() {
    let json = serde_json::json!({
      "@type": "Person",
      "@id": "_:p",
      "name": "Ada",
    });
    let node: Node = serde_json::from_value(json).unwrap();
    let Node::Person(identity) = &node else {
      panic!("expected a Person node")
    };
    assert_eq!(identity.core.name.as_deref(), Some("Ada"));
    assert_eq!(node.kind(), NodeKind::Person);
  }
}
