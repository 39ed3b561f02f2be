//! An in-memory [`RecordStore`], used by the CLI and by tests.

use std::collections::BTreeMap;

use crate::{
  Error, Result,
  record::{ArtifactRecord, Attribute, RecordId, RecordKind},
  store::RecordStore,
};

/// Records kept in id order. New ids continue after the highest id seen.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  records: BTreeMap<RecordId, ArtifactRecord>,
  next_id: i64,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed a store with existing records, keeping their ids.
  pub fn from_records(
    records: impl IntoIterator<Item = ArtifactRecord>,
  ) -> Result<Self> {
    let mut store = Self::new();
    for record in records {
      store.insert(record)?;
    }
    Ok(store)
  }

  /// Insert a record under its own id.
  pub fn insert(&mut self, record: ArtifactRecord) -> Result<()> {
    if self.records.contains_key(&record.id) {
      return Err(Error::DuplicateRecord(record.id));
    }
    self.next_id = self.next_id.max(record.id.0 + 1);
    self.records.insert(record.id, record);
    Ok(())
  }

  pub fn records(&self) -> impl Iterator<Item = &ArtifactRecord> {
    self.records.values()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

impl RecordStore for MemoryStore {
  type Error = Error;

  fn create_record(
    &mut self,
    kind: RecordKind,
    parent: Option<RecordId>,
    attributes: Vec<Attribute>,
  ) -> Result<ArtifactRecord> {
    if let Some(parent) = parent {
      if !self.records.contains_key(&parent) {
        return Err(Error::RecordNotFound(parent));
      }
    }
    for attribute in &attributes {
      attribute.validate()?;
    }

    let id = RecordId(self.next_id.max(1));
    self.next_id = id.0 + 1;

    let record = ArtifactRecord::new(id, kind, parent, attributes);
    self.records.insert(id, record.clone());
    Ok(record)
  }

  fn lookup_record(&self, id: RecordId) -> Result<Option<ArtifactRecord>> {
    Ok(self.records.get(&id).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{ArtifactKind, AttributeType, AttributeValue};

  fn prog_name(value: &str) -> Attribute {
    Attribute::new(
      AttributeType::ProgName,
      "test",
      AttributeValue::Text(value.into()),
    )
  }

  #[test]
  fn create_and_lookup() {
    let mut store = MemoryStore::new();
    let record = store
      .create_record(
        RecordKind::Artifact(ArtifactKind::ProgRun),
        None,
        vec![prog_name("cmd.exe")],
      )
      .unwrap();

    let fetched = store.lookup_record(record.id).unwrap().unwrap();
    assert_eq!(fetched, record);
    assert_eq!(fetched.text(AttributeType::ProgName), Some("cmd.exe"));
  }

  #[test]
  fn lookup_missing_returns_none() {
    let store = MemoryStore::new();
    assert!(store.lookup_record(RecordId(99)).unwrap().is_none());
  }

  #[test]
  fn ids_continue_after_seeded_records() {
    let mut store = MemoryStore::from_records([ArtifactRecord::new(
      RecordId(10),
      RecordKind::DataSource,
      None,
      vec![],
    )])
    .unwrap();

    let created = store
      .create_record(RecordKind::File, Some(RecordId(10)), vec![])
      .unwrap();
    assert_eq!(created.id, RecordId(11));

    let parent = store.structural_parent(&created).unwrap().unwrap();
    assert_eq!(parent.id, RecordId(10));
  }

  #[test]
  fn duplicate_seed_is_rejected() {
    let record =
      ArtifactRecord::new(RecordId(1), RecordKind::Case, None, vec![]);
    let result = MemoryStore::from_records([record.clone(), record]);
    assert!(matches!(result, Err(Error::DuplicateRecord(RecordId(1)))));
  }

  #[test]
  fn unknown_parent_is_rejected() {
    let mut store = MemoryStore::new();
    let result = store.create_record(RecordKind::File, Some(RecordId(5)), vec![]);
    assert!(matches!(result, Err(Error::RecordNotFound(RecordId(5)))));
  }

  #[test]
  fn mismatched_attribute_is_rejected() {
    let mut store = MemoryStore::new();
    let result = store.create_record(
      RecordKind::Artifact(ArtifactKind::ProgRun),
      None,
      vec![Attribute::new(
        AttributeType::Count,
        "test",
        AttributeValue::Text("three".into()),
      )],
    );
    assert!(matches!(result, Err(Error::ValueTypeMismatch { .. })));
    assert!(store.is_empty());
  }
}
