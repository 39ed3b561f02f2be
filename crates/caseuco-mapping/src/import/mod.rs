//! Graph → record reconstruction.
//!
//! Each artifact kind has one reconstructor. A reconstructor checks the node
//! kind, then the facets the kind cannot do without, then gathers whatever
//! optional attributes are present. A failed check is "no match", never an
//! error. The [`Importer`] commits accepted drafts to a [`RecordStore`] and
//! binds the node id to the new record.

mod analysis;
mod comms;
mod device;
mod geo;
mod system;
mod web;

use caseuco_core::{
  event::EventTypeTable,
  facet::FacetShape,
  node::{Node, NodeId, NodeKind, NodeRef},
  record::{ArtifactKind, ArtifactRecord, Attribute, RecordId, RecordKind},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, query::Graph, registry::IdRegistry};

// ─── Drafts and context ──────────────────────────────────────────────────────

/// A reconstructed record that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
  pub kind:       ArtifactKind,
  pub attributes: Vec<Attribute>,
}

impl RecordDraft {
  pub(crate) fn new(
    kind: ArtifactKind,
    attributes: impl IntoIterator<Item = Option<Attribute>>,
  ) -> Self {
    Self {
      kind,
      attributes: attributes.into_iter().flatten().collect(),
    }
  }
}

/// Everything a reconstructor may consult besides the node itself.
pub struct ImportContext<'a> {
  pub graph:       &'a Graph<'a>,
  pub registry:    &'a IdRegistry,
  pub event_types: &'a EventTypeTable,
}

impl<'a> ImportContext<'a> {
  /// The first facet of shape `T` on the trace `reference` points at.
  pub(crate) fn facet_at<T: FacetShape>(
    &self,
    reference: Option<&NodeRef>,
  ) -> Option<&'a T> {
    let trace = self.graph.trace(reference)?;
    crate::query::first::<T>(trace).map(|(_, body)| body)
  }

  /// The `name` of the node `reference` points at.
  pub(crate) fn name_at(&self, reference: Option<&NodeRef>) -> Option<&'a str> {
    self.graph.resolve(reference)?.core().name.as_deref()
  }

  /// Nodes of `kind` linked to `id`.
  pub(crate) fn linked(&self, id: &NodeId, kind: NodeKind) -> Vec<&'a Node> {
    self.graph.nodes_targeting(id, Some(kind))
  }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

type ShapeFn = fn(&Node, &ImportContext<'_>) -> Option<RecordDraft>;
type PayloadFn = fn(&Node, &ImportContext<'_>) -> Result<Option<RecordDraft>>;

/// Most reconstructors cannot fail; the ones that build JSON payloads can.
#[derive(Clone, Copy)]
enum Reconstructor {
  Shape(ShapeFn),
  Payload(PayloadFn),
}

fn reconstructor(kind: ArtifactKind) -> Option<Reconstructor> {
  use ArtifactKind as K;
  use Reconstructor::{Payload, Shape};

  let reconstructor = match kind {
    K::GenInfo => Shape(system::gen_info),
    K::WebBookmark => Shape(web::web_bookmark),
    K::WebCookie => Shape(web::web_cookie),
    K::WebHistory => Shape(web::web_history),
    K::WebDownload => Shape(web::web_download),
    K::RecentObject => Shape(system::recent_object),
    K::InstalledProg => Shape(system::installed_prog),
    K::HashsetHit => Shape(analysis::hashset_hit),
    K::InterestingFileHit => Shape(analysis::interesting_file_hit),
    K::DeviceAttached => Shape(device::device_attached),
    K::EmailMsg => Shape(comms::email_msg),
    K::ExtractedText => Shape(system::extracted_text),
    K::WebSearchQuery => Shape(web::web_search_query),
    K::MetadataExif => Shape(device::metadata_exif),
    K::OsInfo => Shape(system::os_info),
    K::OsAccount => Shape(system::os_account),
    K::ServiceAccount => Shape(system::service_account),
    K::Contact => Shape(comms::contact),
    K::Message => Payload(comms::message),
    K::CallLog => Shape(comms::call_log),
    K::CalendarEntry => Shape(comms::calendar_entry),
    K::SpeedDialEntry => Shape(comms::speed_dial_entry),
    K::BluetoothPairing => Shape(device::bluetooth_pairing),
    K::GpsBookmark => Shape(geo::gps_bookmark),
    K::GpsLastKnownLocation => Shape(geo::gps_last_known_location),
    K::GpsSearch => Shape(geo::gps_search),
    K::ProgRun => Shape(system::prog_run),
    K::EncryptionDetected => Shape(analysis::encryption_detected),
    K::InterestingArtifactHit => Shape(analysis::interesting_artifact_hit),
    K::GpsRoute => Payload(geo::gps_route),
    K::RemoteDrive => Shape(system::remote_drive),
    K::Account => Shape(system::account),
    K::EncryptionSuspected => Shape(analysis::encryption_suspected),
    K::ObjectDetected => Shape(analysis::object_detected),
    K::WifiNetwork => Shape(device::wifi_network),
    K::DeviceInfo => Shape(device::device_info),
    K::SimAttached => Shape(device::sim_attached),
    K::BluetoothAdapter => Shape(device::bluetooth_adapter),
    K::WifiNetworkAdapter => Shape(device::wifi_network_adapter),
    K::VerificationFailed => Shape(analysis::verification_failed),
    K::DataSourceUsage => Shape(system::data_source_usage),
    K::WebFormAddress => Shape(web::web_form_address),
    K::WebCache => Shape(web::web_cache),
    K::TlEvent => Shape(system::tl_event),
    K::ClipboardContent => Shape(system::clipboard_content),
    K::AssociatedObject => Shape(analysis::associated_object),
    K::UserContentSuspected => Shape(analysis::user_content_suspected),
    K::Metadata => Shape(system::metadata),
    K::GpsTrack => Payload(geo::gps_track),
    K::KeywordHit | K::ToolOutput | K::YaraHit | K::WebCategorization => {
      return None;
    }
  };
  Some(reconstructor)
}

/// Try to read `node` as a record of `kind`. `Ok(None)` means the node does
/// not have that shape.
pub fn reconstruct(
  kind: ArtifactKind,
  node: &Node,
  cx: &ImportContext<'_>,
) -> Result<Option<RecordDraft>> {
  match reconstructor(kind) {
    Some(Reconstructor::Shape(f)) => Ok(f(node, cx)),
    Some(Reconstructor::Payload(f)) => f(node, cx),
    None => Ok(None),
  }
}

/// Candidate order for [`CandidatePolicy::FirstMatch`]. A kind whose shape
/// is a superset of another's comes first.
pub const MATCH_ORDER: &[ArtifactKind] = {
  use ArtifactKind as K;
  &[
    K::WebBookmark,
    K::WebCookie,
    K::WebDownload,
    K::WebSearchQuery,
    K::ServiceAccount,
    K::WebCache,
    K::EmailMsg,
    K::Message,
    K::CallLog,
    K::CalendarEntry,
    K::SpeedDialEntry,
    K::Contact,
    K::OsAccount,
    K::Account,
    K::OsInfo,
    K::MetadataExif,
    K::DeviceAttached,
    K::BluetoothPairing,
    K::WifiNetwork,
    K::DeviceInfo,
    K::SimAttached,
    K::BluetoothAdapter,
    K::WifiNetworkAdapter,
    K::GpsBookmark,
    K::GpsRoute,
    K::GpsTrack,
    K::GpsLastKnownLocation,
    K::GpsSearch,
    K::InstalledProg,
    K::RecentObject,
    K::Metadata,
    K::WebHistory,
    K::ProgRun,
    K::RemoteDrive,
    K::GenInfo,
    K::ExtractedText,
    K::ClipboardContent,
    K::WebFormAddress,
    K::TlEvent,
    K::HashsetHit,
    K::InterestingFileHit,
    K::InterestingArtifactHit,
    K::ObjectDetected,
    K::EncryptionDetected,
    K::EncryptionSuspected,
    K::VerificationFailed,
    K::UserContentSuspected,
    K::DataSourceUsage,
    K::AssociatedObject,
  ]
};

/// Kinds that read a node's outgoing links. Linking nodes try these first.
pub const LINKED_KINDS: &[ArtifactKind] =
  &[ArtifactKind::InterestingArtifactHit, ArtifactKind::AssociatedObject];

// ─── Importer ────────────────────────────────────────────────────────────────

/// What to do when several kinds accept the same node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
  /// Keep the first accepting kind in [`MATCH_ORDER`].
  #[default]
  FirstMatch,
  /// Keep every accepting kind.
  AllMatches,
}

#[derive(Debug, Default)]
pub struct ImportReport {
  pub created:   Vec<ArtifactRecord>,
  /// Nodes no reconstructor accepted.
  pub unmatched: Vec<NodeId>,
}

pub struct Importer<'a> {
  event_types:    &'a EventTypeTable,
  registry:       IdRegistry,
  default_parent: Option<RecordId>,
  policy:         CandidatePolicy,
}

impl<'a> Importer<'a> {
  pub fn new(event_types: &'a EventTypeTable) -> Self {
    Self {
      event_types,
      registry: IdRegistry::new(),
      default_parent: None,
      policy: CandidatePolicy::default(),
    }
  }

  /// Start from a registry that already knows some records, typically
  /// [`IdRegistry::seeded`] with the store's contents.
  pub fn with_registry(mut self, registry: IdRegistry) -> Self {
    self.registry = registry;
    self
  }

  /// Parent for records whose node has no resolvable containment edge.
  pub fn with_default_parent(mut self, parent: Option<RecordId>) -> Self {
    self.default_parent = parent;
    self
  }

  pub fn with_policy(mut self, policy: CandidatePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn registry(&self) -> &IdRegistry {
    &self.registry
  }

  /// Reconstruct `node` as `kind` and, if it matches, store the record and
  /// bind the node id to it.
  pub fn reconstruct_as<S: RecordStore>(
    &mut self,
    kind: ArtifactKind,
    node: &Node,
    graph: &Graph<'_>,
    store: &mut S,
  ) -> Result<Option<ArtifactRecord>> {
    let Some(draft) = reconstruct(kind, node, &self.context(graph))? else {
      return Ok(None);
    };
    let parent = self.parent_of(node, graph);
    self.commit(node, draft, parent, store).map(Some)
  }

  /// Every draft `node` yields under the importer's policy, in `order`.
  /// Nothing is stored, so a failing reconstructor leaves the store as it
  /// was.
  pub fn candidates(
    &self,
    node: &Node,
    graph: &Graph<'_>,
    order: &[ArtifactKind],
  ) -> Result<Vec<RecordDraft>> {
    let cx = self.context(graph);
    let mut drafts = Vec::new();
    for &kind in order {
      let Some(draft) = reconstruct(kind, node, &cx)? else {
        continue;
      };
      drafts.push(draft);
      if self.policy == CandidatePolicy::FirstMatch {
        break;
      }
    }
    Ok(drafts)
  }

  /// Import every primary node of a graph.
  ///
  /// Nodes that link to other nodes are imported last, so the records their
  /// links point at are already bound.
  pub fn import_graph<S: RecordStore>(
    &mut self,
    nodes: &[Node],
    store: &mut S,
  ) -> Result<ImportReport> {
    let graph = Graph::new(nodes);
    let (linking, plain): (Vec<&Node>, Vec<&Node>) = nodes
      .iter()
      .filter(|node| is_candidate(node))
      .partition(|node| !graph.targets_of_source(node.id()).is_empty());

    let linked_order: Vec<ArtifactKind> = LINKED_KINDS
      .iter()
      .chain(MATCH_ORDER.iter().filter(|k| !LINKED_KINDS.contains(*k)))
      .copied()
      .collect();

    let mut report = ImportReport::default();
    for node in plain {
      self.import_node(node, &graph, MATCH_ORDER, store, &mut report)?;
    }
    for node in linking {
      self.import_node(node, &graph, &linked_order, store, &mut report)?;
    }

    tracing::info!(
      created = report.created.len(),
      unmatched = report.unmatched.len(),
      "graph import finished"
    );
    Ok(report)
  }

  fn import_node<S: RecordStore>(
    &mut self,
    node: &Node,
    graph: &Graph<'_>,
    order: &[ArtifactKind],
    store: &mut S,
    report: &mut ImportReport,
  ) -> Result<()> {
    let drafts = self.candidates(node, graph, order)?;
    if drafts.is_empty() {
      tracing::debug!(node = %node.id(), kind = %node.kind(), "no reconstructor accepted node");
      report.unmatched.push(node.id().clone());
      return Ok(());
    }

    let parent = self.parent_of(node, graph);
    for draft in drafts {
      let kind = draft.kind;
      let record = self.commit(node, draft, parent, store)?;
      tracing::debug!(node = %node.id(), record = %record.id, %kind, "imported node");
      report.created.push(record);
    }
    Ok(())
  }

  fn context<'g>(&'g self, graph: &'g Graph<'g>) -> ImportContext<'g> {
    ImportContext {
      graph,
      registry: &self.registry,
      event_types: self.event_types,
    }
  }

  /// The record the node's containment edge points at, else the default.
  fn parent_of(&self, node: &Node, graph: &Graph<'_>) -> Option<RecordId> {
    graph
      .containment_target(node.id())
      .and_then(|parent| self.registry.resolve(parent))
      .or(self.default_parent)
  }

  fn commit<S: RecordStore>(
    &mut self,
    node: &Node,
    draft: RecordDraft,
    parent: Option<RecordId>,
    store: &mut S,
  ) -> Result<ArtifactRecord> {
    let record = store
      .create_record(RecordKind::Artifact(draft.kind), parent, draft.attributes)
      .map_err(Error::data_access)?;
    self.registry.bind(node.id(), &record);
    Ok(record)
  }
}

/// Blank nodes are satellites; relationships are edges.
fn is_candidate(node: &Node) -> bool {
  !node.id().is_blank() && node.kind() != NodeKind::Relationship
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn match_order_covers_every_reconstructable_kind() {
    let ordered: HashSet<_> = MATCH_ORDER.iter().copied().collect();
    assert_eq!(ordered.len(), MATCH_ORDER.len(), "duplicate kind in order");
    for kind in ordered.iter().copied() {
      assert!(reconstructor(kind).is_some(), "{kind} has no reconstructor");
    }
    for kind in LINKED_KINDS {
      assert!(ordered.contains(kind));
    }
  }

  #[test]
  fn unmappable_kinds_never_match() {
    let nodes = [Node::Trace(caseuco_core::node::Trace::new(NodeId::from("kb:t")))];
    let graph = Graph::new(&nodes);
    let registry = IdRegistry::new();
    let table = EventTypeTable::standard();
    let cx = ImportContext {
      graph:       &graph,
      registry:    &registry,
      event_types: &table,
    };
    let draft = reconstruct(ArtifactKind::KeywordHit, &nodes[0], &cx).unwrap();
    assert!(draft.is_none());
  }
}
