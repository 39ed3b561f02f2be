//! The identifier registry: graph node id → record id.
//!
//! One registry lives for one export or import call. Entries are only ever
//! added; the first binding for a node id sticks.

use std::collections::HashMap;

use caseuco_core::{
  node::NodeId,
  record::{ArtifactRecord, RecordId},
};

#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
  mapping: HashMap<NodeId, RecordId>,
}

impl IdRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry that already knows the durable id of every given record.
  pub fn seeded<'a>(
    records: impl IntoIterator<Item = &'a ArtifactRecord>,
  ) -> Self {
    let mut registry = Self::new();
    for record in records {
      registry.bind_id(NodeId::for_record(record.id), record.id);
    }
    registry
  }

  pub fn bind(&mut self, node: &NodeId, record: &ArtifactRecord) {
    self.bind_id(node.clone(), record.id);
  }

  /// Returns `false` if `node` was already bound; the old binding is kept.
  pub fn bind_id(&mut self, node: NodeId, record: RecordId) -> bool {
    match self.mapping.entry(node) {
      std::collections::hash_map::Entry::Occupied(_) => false,
      std::collections::hash_map::Entry::Vacant(slot) => {
        slot.insert(record);
        true
      }
    }
  }

  pub fn resolve(&self, node: &NodeId) -> Option<RecordId> {
    self.mapping.get(node).copied()
  }

  pub fn len(&self) -> usize {
    self.mapping.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mapping.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use caseuco_core::record::RecordKind;

  use super::*;

  #[test]
  fn unbound_id_resolves_to_nothing() {
    let registry = IdRegistry::new();
    assert_eq!(registry.resolve(&NodeId::from("kb:missing")), None);
  }

  #[test]
  fn first_binding_wins() {
    let mut registry = IdRegistry::new();
    let node = NodeId::from("kb:a");
    assert!(registry.bind_id(node.clone(), RecordId(1)));
    assert!(!registry.bind_id(node.clone(), RecordId(2)));
    assert_eq!(registry.resolve(&node), Some(RecordId(1)));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn seeded_registry_knows_durable_ids() {
    let records = [
      ArtifactRecord::new(RecordId(3), RecordKind::DataSource, None, vec![]),
      ArtifactRecord::new(RecordId(4), RecordKind::File, Some(RecordId(3)), vec![]),
    ];
    let registry = IdRegistry::seeded(&records);
    assert_eq!(
      registry.resolve(&NodeId::for_record(RecordId(4))),
      Some(RecordId(4))
    );
    assert_eq!(registry.len(), 2);
  }
}
