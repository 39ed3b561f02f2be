//! Record → graph assembly.
//!
//! Each record kind has one assembler. An assembler builds the primary node
//! (whose id is the record's durable id) and any satellite nodes it needs,
//! linking them with plain relationships. The [`Exporter`] then appends the
//! containment edge to the record's structural parent.
//!
//! Output order is: primary node, satellites in creation order, containment
//! edge.

mod analysis;
pub(crate) mod comms;
mod content;
mod device;
mod geo;
pub(crate) mod system;
pub(crate) mod web;

use caseuco_core::{
  event::EventTypeTable,
  facet::Facet,
  node::{CoreProperties, Identity, Location, Node, NodeId, NodeRef, Trace},
  record::{
    ArtifactKind, ArtifactRecord, AttributeType, RecordId, RecordKind,
  },
  store::RecordStore,
};

use crate::{
  Error, Result,
  coerce,
  config::ExportConfig,
  registry::IdRegistry,
  relationship::{emit_containment, link},
};

// ─── Record lookup ───────────────────────────────────────────────────────────

/// Read access to records, with store failures folded into [`Error`].
pub trait RecordLookup {
  fn lookup(&self, id: RecordId) -> Result<Option<ArtifactRecord>>;
}

impl<S: RecordStore> RecordLookup for S {
  fn lookup(&self, id: RecordId) -> Result<Option<ArtifactRecord>> {
    self.lookup_record(id).map_err(Error::data_access)
  }
}

// ─── Exporter ────────────────────────────────────────────────────────────────

pub struct Exporter<'a> {
  config:      ExportConfig,
  event_types: &'a EventTypeTable,
  store:       &'a dyn RecordLookup,
  registry:    IdRegistry,
}

impl<'a> Exporter<'a> {
  pub fn new<S: RecordStore>(
    store: &'a S,
    event_types: &'a EventTypeTable,
    config: ExportConfig,
  ) -> Self {
    Self {
      config,
      event_types,
      store,
      registry: IdRegistry::new(),
    }
  }

  /// Every primary node emitted so far, bound to its record.
  pub fn registry(&self) -> &IdRegistry {
    &self.registry
  }

  /// Export any record: a content entity or an artifact.
  pub fn export_entity(&mut self, record: &ArtifactRecord) -> Result<Vec<Node>> {
    let assemble = match record.kind {
      RecordKind::Artifact(_) => return self.export_artifact(record),
      RecordKind::Case => content::case,
      RecordKind::DataSource => content::data_source,
      RecordKind::File => content::file,
      RecordKind::FileSystem => content::file_system,
      RecordKind::Volume => content::volume,
      RecordKind::VolumeSystem | RecordKind::Pool => content::sized,
      RecordKind::ContentTag => content::content_tag,
    };
    self.assemble(record, assemble)
  }

  /// Export an artifact record. Kinds without a graph shape, and records
  /// that are not artifacts at all, are [`Error::NotExportable`].
  pub fn export_artifact(
    &mut self,
    record: &ArtifactRecord,
  ) -> Result<Vec<Node>> {
    let assemble = match record.kind {
      RecordKind::Artifact(kind) => artifact_assembler(kind),
      _ => None,
    };
    let Some(assemble) = assemble else {
      return Err(Error::NotExportable {
        id:   record.id,
        kind: record.kind,
      });
    };
    self.assemble(record, assemble)
  }

  fn assemble(
    &mut self,
    record: &ArtifactRecord,
    assemble: AssembleFn,
  ) -> Result<Vec<Node>> {
    let mut assembly = Assembly::new(record.id, self.store, self.event_types);
    assemble(&mut assembly, record)?;
    let mut output = assembly.finish();

    let primary = NodeId::for_record(record.id);
    // A tag points at its parent through the annotation object instead.
    let parent = match record.kind {
      RecordKind::ContentTag => None,
      _ => self.structural_parent(record)?,
    };
    if let Some(parent) = parent {
      emit_containment(
        &mut output,
        &primary,
        &NodeId::for_record(parent),
        self.config.include_parent_child,
      );
    }

    self.registry.bind_id(primary, record.id);
    tracing::debug!(
      record = %record.id,
      kind = %record.kind,
      nodes = output.len(),
      "exported record"
    );
    Ok(output)
  }

  fn structural_parent(&self, record: &ArtifactRecord) -> Result<Option<RecordId>> {
    let Some(parent) = record.parent else {
      return Ok(None);
    };
    Ok(self.store.lookup(parent)?.map(|p| p.id))
  }
}

type AssembleFn = fn(&mut Assembly<'_>, &ArtifactRecord) -> Result<()>;

fn artifact_assembler(kind: ArtifactKind) -> Option<AssembleFn> {
  use ArtifactKind as K;

  let assemble: AssembleFn = match kind {
    K::GenInfo => system::gen_info,
    K::WebBookmark => web::web_bookmark,
    K::WebCookie => web::web_cookie,
    K::WebHistory => web::web_history,
    K::WebDownload => web::web_download,
    K::RecentObject => system::recent_object,
    K::InstalledProg => system::installed_prog,
    K::HashsetHit | K::InterestingFileHit => analysis::named_assertion,
    K::DeviceAttached => device::device_attached,
    K::EmailMsg => comms::email_msg,
    K::ExtractedText => system::extracted_text,
    K::WebSearchQuery => web::web_search_query,
    K::MetadataExif => device::metadata_exif,
    K::OsInfo => system::os_info,
    K::OsAccount => system::os_account,
    K::ServiceAccount => system::service_account,
    K::Contact => comms::contact,
    K::Message => comms::message,
    K::CallLog => comms::call_log,
    K::CalendarEntry => comms::calendar_entry,
    K::SpeedDialEntry => comms::speed_dial_entry,
    K::BluetoothPairing => device::bluetooth_pairing,
    K::GpsBookmark => geo::gps_bookmark,
    K::GpsLastKnownLocation | K::GpsSearch => geo::gps_point,
    K::ProgRun => system::prog_run,
    K::EncryptionDetected
    | K::EncryptionSuspected
    | K::VerificationFailed
    | K::UserContentSuspected => analysis::statement_assertion,
    K::InterestingArtifactHit => analysis::interesting_artifact_hit,
    K::GpsRoute => geo::gps_route,
    K::RemoteDrive => system::remote_drive,
    K::Account => system::account,
    K::ObjectDetected => analysis::object_detected,
    K::WifiNetwork => device::wifi_network,
    K::DeviceInfo => device::device_info,
    K::SimAttached => device::sim_attached,
    K::BluetoothAdapter | K::WifiNetworkAdapter => device::mac_adapter,
    K::DataSourceUsage => system::data_source_usage,
    K::WebFormAddress => web::web_form_address,
    K::WebCache => web::web_cache,
    K::TlEvent => system::tl_event,
    K::ClipboardContent => system::clipboard_content,
    K::AssociatedObject => analysis::associated_object,
    K::Metadata => system::metadata,
    K::GpsTrack => geo::gps_track,
    K::KeywordHit | K::ToolOutput | K::YaraHit | K::WebCategorization => {
      return None;
    }
  };
  Some(assemble)
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Scratch space for one record's nodes.
pub(crate) struct Assembly<'a> {
  pub id:          NodeId,
  pub event_types: &'a EventTypeTable,
  store:           &'a dyn RecordLookup,
  primary:         Option<Node>,
  satellites:      Vec<Node>,
}

impl<'a> Assembly<'a> {
  fn new(
    record: RecordId,
    store: &'a dyn RecordLookup,
    event_types: &'a EventTypeTable,
  ) -> Self {
    Self {
      id: NodeId::for_record(record),
      event_types,
      store,
      primary: None,
      satellites: Vec::new(),
    }
  }

  /// An empty trace carrying the primary id.
  pub fn trace(&self) -> Trace {
    Trace::new(self.id.clone())
  }

  pub fn primary(&mut self, node: impl Into<Node>) {
    self.primary = Some(node.into());
  }

  /// Append a satellite node and return a reference to it.
  pub fn satellite(&mut self, node: Node) -> NodeRef {
    let reference = NodeRef::from(node.id());
    self.satellites.push(node);
    reference
  }

  /// A blank trace holding a single facet.
  pub fn satellite_trace(&mut self, facet: impl Into<Facet>) -> NodeRef {
    self.satellite(Node::Trace(Trace::new(NodeId::blank()).with_facet(facet)))
  }

  pub fn satellite_identity(&mut self, name: Option<String>) -> NodeRef {
    self.satellite(Node::Identity(blank_identity(name)))
  }

  pub fn satellite_person(&mut self, name: Option<String>) -> NodeRef {
    self.satellite(Node::Person(blank_identity(name)))
  }

  pub fn satellite_organization(&mut self, name: Option<String>) -> NodeRef {
    self.satellite(Node::Organization(blank_identity(name)))
  }

  pub fn satellite_location(&mut self, name: Option<String>) -> NodeRef {
    self.satellite(Node::Location(Location {
      id:   NodeId::blank(),
      core: CoreProperties::named(name),
    }))
  }

  /// Link `source` to `target` with a plain relationship.
  pub fn link(&mut self, source: &NodeId, target: &NodeId) {
    self.satellites.push(Node::Relationship(link(source, target)));
  }

  pub fn lookup(&self, id: RecordId) -> Result<Option<ArtifactRecord>> {
    self.store.lookup(id)
  }

  fn finish(self) -> Vec<Node> {
    self.primary.into_iter().chain(self.satellites).collect()
  }
}

fn blank_identity(name: Option<String>) -> Identity {
  Identity {
    id:   NodeId::blank(),
    core: CoreProperties::named(name),
  }
}

// ─── Attribute reads ─────────────────────────────────────────────────────────

/// Owned attribute reads in the form facet fields want.
pub(crate) trait RecordExt {
  fn string(&self, attr_type: AttributeType) -> Option<String>;

  /// A date-time attribute rendered as ISO-8601.
  fn iso(&self, attr_type: AttributeType) -> Option<String>;
}

impl RecordExt for ArtifactRecord {
  fn string(&self, attr_type: AttributeType) -> Option<String> {
    self.text(attr_type).map(str::to_string)
  }

  fn iso(&self, attr_type: AttributeType) -> Option<String> {
    coerce::iso_timestamp(self.datetime(attr_type)?)
  }
}
