//! Assertions and associations.
//!
//! An assertion with a name and a statement fits several kinds equally well.
//! Each kind's reconstructor accepts it on its own; the importer's candidate
//! policy decides which to keep.

use caseuco_core::{
  node::Node,
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::coerce::{long, text};

fn named(node: &Node, kind: ArtifactKind) -> Option<RecordDraft> {
  let assertion = node.as_assertion()?;
  let name = assertion.core.name.as_deref()?;
  let statement = assertion.statement.as_deref()?;
  Some(RecordDraft::new(kind, [
    text(A::SetName, Some(name)),
    text(A::Comment, Some(statement)),
  ]))
}

fn statement(node: &Node, kind: ArtifactKind) -> Option<RecordDraft> {
  let comment = node.as_assertion()?.statement.as_deref()?;
  Some(RecordDraft::new(kind, [text(A::Comment, Some(comment))]))
}

pub(super) fn hashset_hit(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  named(node, ArtifactKind::HashsetHit)
}

pub(super) fn interesting_file_hit(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  named(node, ArtifactKind::InterestingFileHit)
}

/// The associated artifact is the first link target already bound to a
/// record.
pub(super) fn interesting_artifact_hit(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let mut draft = named(node, ArtifactKind::InterestingArtifactHit)?;
  let associated = cx
    .graph
    .targets_of_source(node.id())
    .into_iter()
    .find_map(|target| cx.registry.resolve(target));
  draft
    .attributes
    .extend(long(A::AssociatedArtifact, associated.map(|id| id.0)));
  Some(draft)
}

pub(super) fn encryption_detected(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  statement(node, ArtifactKind::EncryptionDetected)
}

pub(super) fn encryption_suspected(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  statement(node, ArtifactKind::EncryptionSuspected)
}

pub(super) fn verification_failed(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  statement(node, ArtifactKind::VerificationFailed)
}

pub(super) fn user_content_suspected(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  statement(node, ArtifactKind::UserContentSuspected)
}

pub(super) fn object_detected(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let mut draft = statement(node, ArtifactKind::ObjectDetected)?;
  let description = node.core().description.as_deref();
  draft.attributes.extend(text(A::Description, description));
  Some(draft)
}

/// An empty trace with exactly one link, to a node that is already a record.
pub(super) fn associated_object(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  if !trace.facets.is_empty() {
    return None;
  }
  let targets = cx.graph.targets_of_source(&trace.id);
  let [target] = targets.as_slice() else {
    return None;
  };
  let associated = cx.registry.resolve(target)?;

  Some(RecordDraft::new(ArtifactKind::AssociatedObject, [long(
    A::AssociatedArtifact,
    Some(associated.0),
  )]))
}
