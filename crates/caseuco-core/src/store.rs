//! The `RecordStore` trait: the engine's only view of a record backend.
//!
//! Backends allocate record ids and persist records; the mapping engine only
//! creates records (with all attributes attached at creation) and reads them
//! back. Calls are blocking and each creation is treated as one transaction.

use crate::record::{ArtifactRecord, Attribute, RecordId, RecordKind};

// ─── Trait ───────────────────────────────────────────────────────────────────

pub trait RecordStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a record. The store assigns the id.
  fn create_record(
    &mut self,
    kind: RecordKind,
    parent: Option<RecordId>,
    attributes: Vec<Attribute>,
  ) -> Result<ArtifactRecord, Self::Error>;

  /// Retrieve a record by id. Returns `None` if not found.
  fn lookup_record(
    &self,
    id: RecordId,
  ) -> Result<Option<ArtifactRecord>, Self::Error>;

  /// The record that structurally contains `record`, if any.
  fn structural_parent(
    &self,
    record: &ArtifactRecord,
  ) -> Result<Option<ArtifactRecord>, Self::Error> {
    match record.parent {
      Some(parent) => self.lookup_record(parent),
      None => Ok(None),
    }
  }
}
