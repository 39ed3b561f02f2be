//! Analysis results: assertions about other evidence.

use caseuco_core::{
  node::{Assertion, CoreProperties, NodeId},
  record::{ArtifactRecord, AttributeType as A, RecordId},
};

use super::{Assembly, RecordExt};
use crate::Result;

fn assertion(
  asm: &Assembly<'_>,
  core: CoreProperties,
  record: &ArtifactRecord,
) -> Assertion {
  Assertion {
    id: asm.id.clone(),
    core,
    statement: record.string(A::Comment),
  }
}

/// Hash set and interesting file hits: the set name and a comment.
pub(super) fn named_assertion(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let core = CoreProperties::named(record.string(A::SetName));
  let node = assertion(asm, core, record);
  asm.primary(node);
  Ok(())
}

pub(super) fn statement_assertion(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let node = assertion(asm, CoreProperties::default(), record);
  asm.primary(node);
  Ok(())
}

pub(super) fn object_detected(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let core = CoreProperties {
    description: record.string(A::Description),
    ..Default::default()
  };
  let node = assertion(asm, core, record);
  asm.primary(node);
  Ok(())
}

/// Links to the associated artifact only when that record exists.
pub(super) fn interesting_artifact_hit(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let core = CoreProperties::named(record.string(A::SetName));
  let node = assertion(asm, core, record);
  asm.primary(node);

  if let Some(associated) = record.long(A::AssociatedArtifact) {
    match asm.lookup(RecordId(associated))? {
      Some(target) => {
        let primary = asm.id.clone();
        asm.link(&primary, &NodeId::for_record(target.id));
      }
      None => tracing::debug!(
        record = %record.id,
        associated,
        "associated artifact not found; no link emitted"
      ),
    }
  }
  Ok(())
}

/// An empty trace linked to the artifact it is associated with.
pub(super) fn associated_object(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace());
  if let Some(associated) = record.long(A::AssociatedArtifact) {
    let primary = asm.id.clone();
    asm.link(&primary, &NodeId::for_record(RecordId(associated)));
  }
  Ok(())
}
