//! Bidirectional mapping between forensic records and a CASE/UCO object
//! graph.
//!
//! The [`Exporter`] turns a record into a primary node plus satellites and an
//! optional containment edge. The [`Importer`] reads nodes back into new
//! records, resolving cross-references through an [`IdRegistry`]. Pure
//! synchronous; the record store is reached only through
//! [`caseuco_core::store::RecordStore`].
//!
//! # Quick start
//!
//! ```no_run
//! use caseuco_core::{event::EventTypeTable, memory::MemoryStore};
//! use caseuco_mapping::{ExportConfig, Exporter, Importer, IdRegistry};
//!
//! let store = MemoryStore::new();
//! let table = EventTypeTable::standard();
//! let mut exporter = Exporter::new(&store, &table, ExportConfig::default());
//! let mut nodes = Vec::new();
//! for record in store.records() {
//!   nodes.extend(exporter.export_entity(record).unwrap());
//! }
//!
//! let mut target = MemoryStore::new();
//! let mut importer =
//!   Importer::new(&table).with_registry(IdRegistry::seeded(target.records()));
//! let report = importer.import_graph(&nodes, &mut target).unwrap();
//! println!("{} records created", report.created.len());
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod query;
pub mod registry;
pub mod relationship;


pub use config::ExportConfig;
pub use error::{Error, Result};
pub use export::{Exporter, RecordLookup};
pub use import::{
  CandidatePolicy, ImportContext, ImportReport, Importer, RecordDraft,
  reconstruct,
};
pub use query::Graph;
pub use registry::IdRegistry;

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use caseuco_core::{
    payload::{GeoWaypoints, MessageAttachments, UrlAttachment, Waypoint},
    record::{ArtifactKind, AttributeType as A, AttributeValue as V, RecordId},
  };

  use super::test_helpers::*;

  /// Export `attributes` as a record of `kind`, import the graph into a fresh
  /// store holding the same data source, and compare.
  fn assert_round_trip(kind: ArtifactKind, attributes: Vec<(A, V)>) {
    let original = artifact(10, kind, attributes);
    let nodes = export_with_source(&original);
    let (_, report) = import_with_source(&nodes);

    let [created] = report.created.as_slice() else {
      panic!("expected one record for {kind}, got {:?}", report.created)
    };
    assert_eq!(created.kind, original.kind);
    assert_eq!(created.parent, Some(RecordId(DATA_SOURCE)));
    assert_eq!(values(created), values(&original), "{kind} changed on the way back");
  }

  #[test]
  fn web_bookmark() {
    assert_round_trip(ArtifactKind::WebBookmark, vec![
      (A::Url, text("https://example.com/a")),
      (A::Name, text("Example")),
      (A::DatetimeCreated, V::DateTime(1_577_836_800)),
      (A::ProgName, text("Browser")),
      (A::Domain, text("example.com")),
    ]);
  }

  #[test]
  fn html_email() {
    assert_round_trip(ArtifactKind::EmailMsg, vec![
      (A::EmailContentHtml, text("<p>hello</p>")),
      (A::DatetimeSent, V::DateTime(1_600_000_000)),
      (A::DatetimeRcvd, V::DateTime(1_600_000_060)),
      (A::EmailFrom, text("alice@example.com")),
      (A::EmailTo, text("bob@example.com")),
      (A::EmailCc, text("carol@example.com")),
      (A::Headers, text("X-Mailer: test")),
      (A::MsgId, text("<1@example.com>")),
      (A::Subject, text("hi")),
      (A::Path, text("/mail/inbox/1.eml")),
    ]);
  }

  #[test]
  fn contact_with_tagged_numbers() {
    assert_round_trip(ArtifactKind::Contact, vec![
      (A::Name, text("Ada Lovelace")),
      (A::Email, text("ada@example.com")),
      (A::EmailOffice, text("ada@work.example")),
      (A::PhoneNumber, text("+15550001")),
      (A::PhoneNumberHome, text("+15550002")),
      (A::PhoneNumberMobile, text("+15550003")),
    ]);
  }

  #[test]
  fn message_with_url_attachments() {
    let attachments = MessageAttachments {
      file_attachments: Vec::new(),
      url_attachments:  vec![UrlAttachment {
        url_string: "https://example.com/cat.png".into(),
      }],
    };
    assert_round_trip(ArtifactKind::Message, vec![
      (A::Text, text("see attached")),
      (A::MessageType, text("SMS")),
      (A::Datetime, V::DateTime(1_600_000_000)),
      (A::Direction, text("Incoming")),
      (A::ThreadId, text("thread-9")),
      (A::PhoneNumberFrom, text("+15550001")),
      (A::PhoneNumberTo, text("+15550002")),
      (A::ReadStatus, V::Integer(1)),
      (A::Attachments, V::Json(serde_json::to_value(&attachments).unwrap())),
    ]);
  }

  #[test]
  fn os_account() {
    assert_round_trip(ArtifactKind::OsAccount, vec![
      (A::Email, text("admin@example.com")),
      (A::Path, text("C:/Users/admin")),
      (A::Groups, text("Administrators")),
      (A::Flag, text("enabled")),
      (A::DisplayName, text("Admin")),
      (A::DatetimeAccessed, V::DateTime(1_600_000_000)),
      (A::Description, text("built-in account")),
      (A::Name, text("Administrator")),
      (A::AccountType, text("local")),
      (A::UserId, text("S-1-5-21-500")),
      (A::DatetimeCreated, V::DateTime(1_500_000_000)),
    ]);
  }

  #[test]
  fn service_account_keeps_positional_names() {
    assert_round_trip(ArtifactKind::ServiceAccount, vec![
      (A::Category, text("email")),
      (A::Domain, text("mail.example.com")),
      (A::EmailReplyto, text("reply@example.com")),
      (A::Name, text("Display Name")),
      (A::UserName, text("user42")),
      (A::Password, text("hunter2")),
      (A::Path, text("/data/accounts.db")),
      (A::Url, text("https://mail.example.com")),
      (A::Description, text("mail account")),
      (A::ProgName, text("Mail")),
      (A::UserId, text("42")),
      (A::DatetimeCreated, V::DateTime(1_550_000_000)),
    ]);
  }

  #[test]
  fn gps_route_with_waypoints() {
    let waypoints = GeoWaypoints {
      points: vec![
        Waypoint {
          latitude:  51.5,
          longitude: -0.12,
          altitude:  Some(11.0),
          name:      Some("start".into()),
        },
        Waypoint {
          latitude:  48.85,
          longitude: 2.35,
          altitude:  None,
          name:      None,
        },
      ],
    };
    assert_round_trip(ArtifactKind::GpsRoute, vec![
      (A::ProgName, text("Maps")),
      (A::Location, text("London to Paris")),
      (A::Datetime, V::DateTime(1_600_000_000)),
      (A::Name, text("Trip")),
      (A::GeoWaypoints, V::Json(serde_json::to_value(&waypoints).unwrap())),
    ]);
  }

  #[test]
  fn timeline_event_type_survives() {
    assert_round_trip(ArtifactKind::TlEvent, vec![
      (A::Datetime, V::DateTime(1_600_000_000)),
      (A::Description, text("visited example.com")),
      (A::TlEventType, V::Long(11)),
    ]);
  }

  #[test]
  fn remote_drive_paths_stay_in_order() {
    assert_round_trip(ArtifactKind::RemoteDrive, vec![
      (A::RemotePath, text("//server/share")),
      (A::LocalPath, text("Z:")),
    ]);
  }

  #[test]
  fn document_metadata() {
    assert_round_trip(ArtifactKind::Metadata, vec![
      (A::ProgName, text("Word")),
      (A::Version, text("16.0")),
      (A::DatetimeCreated, V::DateTime(1_500_000_000)),
      (A::DatetimeModified, V::DateTime(1_500_000_600)),
      (A::Description, text("quarterly report")),
      (A::Owner, text("Finance")),
      (A::LastPrintedDatetime, V::DateTime(1_500_001_000)),
      (A::UserId, text("jdoe")),
      (A::Organization, text("Acme")),
    ]);
  }

  #[test]
  fn wifi_network_device_id() {
    assert_round_trip(ArtifactKind::WifiNetwork, vec![
      (A::Ssid, text("home")),
      (A::Datetime, V::DateTime(1_600_000_000)),
      (A::DeviceId, text("device-7")),
    ]);
  }

  #[test]
  fn device_info_with_sim() {
    assert_round_trip(ArtifactKind::DeviceInfo, vec![
      (A::Imei, text("490154203237518")),
      (A::Iccid, text("8944500102198304826")),
      (A::Imsi, text("234150999999999")),
    ]);
  }

  #[test]
  fn device_info_without_imei_keeps_its_kind() {
    assert_round_trip(ArtifactKind::DeviceInfo, vec![(
      A::Imsi,
      text("234150999999999"),
    )]);
  }

  #[test]
  fn hashset_hit() {
    assert_round_trip(ArtifactKind::HashsetHit, vec![
      (A::SetName, text("Known Hashes")),
      (A::Comment, text("matched")),
    ]);
  }
}

// ─── Shared test helpers ─────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use caseuco_core::{
    event::EventTypeTable,
    memory::MemoryStore,
    node::Node,
    record::{
      ArtifactKind, ArtifactRecord, Attribute, AttributeType, AttributeValue,
      RecordId, RecordKind,
    },
  };

  use crate::{ExportConfig, Exporter, IdRegistry, ImportReport, Importer};

  /// Id of the data source every test record hangs off.
  pub(crate) const DATA_SOURCE: i64 = 1;

  pub(crate) fn text(value: &str) -> AttributeValue {
    AttributeValue::Text(value.to_string())
  }

  pub(crate) fn artifact(
    id: i64,
    kind: ArtifactKind,
    attributes: Vec<(AttributeType, AttributeValue)>,
  ) -> ArtifactRecord {
    ArtifactRecord::new(
      RecordId(id),
      RecordKind::Artifact(kind),
      Some(RecordId(DATA_SOURCE)),
      attributes
        .into_iter()
        .map(|(ty, value)| Attribute::new(ty, "test", value))
        .collect(),
    )
  }

  pub(crate) fn data_source() -> ArtifactRecord {
    ArtifactRecord::new(
      RecordId(DATA_SOURCE),
      RecordKind::DataSource,
      None,
      vec![Attribute::new(
        AttributeType::Name,
        "test",
        text("image.e01"),
      )],
    )
  }

  /// A store holding the data source plus `records`.
  pub(crate) fn store_with(records: Vec<ArtifactRecord>) -> MemoryStore {
    MemoryStore::from_records(std::iter::once(data_source()).chain(records))
      .unwrap()
  }

  pub(crate) fn export_with_source(record: &ArtifactRecord) -> Vec<Node> {
    let store = store_with(vec![record.clone()]);
    let table = EventTypeTable::standard();
    let mut exporter = Exporter::new(&store, &table, ExportConfig::default());
    exporter.export_entity(record).unwrap()
  }

  /// Import `nodes` into a store that only holds the data source.
  pub(crate) fn import_with_source(
    nodes: &[Node],
  ) -> (MemoryStore, ImportReport) {
    let mut store = store_with(Vec::new());
    let table = EventTypeTable::standard();
    let mut importer =
      Importer::new(&table).with_registry(IdRegistry::seeded(store.records()));
    let report = importer.import_graph(nodes, &mut store).unwrap();
    (store, report)
  }

  /// Attribute values by type, without their source tags.
  pub(crate) fn values(
    record: &ArtifactRecord,
  ) -> Vec<(AttributeType, AttributeValue)> {
    record
      .attributes()
      .iter()
      .map(|a| (a.attr_type, a.value.clone()))
      .collect()
  }
}
