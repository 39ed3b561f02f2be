//! The record side of the mapping: typed forensic entities with flat
//! attribute sets.
//!
//! Records are created by a [`RecordStore`](crate::store::RecordStore) and
//! never mutated afterwards. Attribute types are unique per record; when a
//! list carries the same type twice, the later entry wins.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-allocated record identifier.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Whether an artifact kind records observed data or the outcome of an
/// analysis. Decides how a store files the new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactCategory {
  DataArtifact,
  AnalysisResult,
}

/// The closed set of artifact kinds a record may carry.
///
/// Kinds at the bottom of the list have no graph shape and are rejected by
/// the exporter.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
  GenInfo,
  WebBookmark,
  WebCookie,
  WebHistory,
  WebDownload,
  RecentObject,
  InstalledProg,
  HashsetHit,
  DeviceAttached,
  InterestingFileHit,
  EmailMsg,
  ExtractedText,
  WebSearchQuery,
  MetadataExif,
  OsInfo,
  OsAccount,
  ServiceAccount,
  Contact,
  Message,
  CallLog,
  CalendarEntry,
  SpeedDialEntry,
  BluetoothPairing,
  GpsBookmark,
  GpsLastKnownLocation,
  GpsSearch,
  ProgRun,
  EncryptionDetected,
  InterestingArtifactHit,
  GpsRoute,
  RemoteDrive,
  Account,
  EncryptionSuspected,
  ObjectDetected,
  WifiNetwork,
  DeviceInfo,
  SimAttached,
  BluetoothAdapter,
  WifiNetworkAdapter,
  VerificationFailed,
  DataSourceUsage,
  WebFormAddress,
  WebCache,
  TlEvent,
  ClipboardContent,
  AssociatedObject,
  UserContentSuspected,
  Metadata,
  GpsTrack,

  // ── No graph shape ──────────────────────────────────────────────────────
  KeywordHit,
  ToolOutput,
  YaraHit,
  WebCategorization,
}

impl ArtifactKind {
  pub fn category(self) -> ArtifactCategory {
    match self {
      Self::HashsetHit
      | Self::InterestingFileHit
      | Self::InterestingArtifactHit
      | Self::EncryptionDetected
      | Self::EncryptionSuspected
      | Self::ObjectDetected
      | Self::VerificationFailed
      | Self::UserContentSuspected
      | Self::KeywordHit
      | Self::YaraHit
      | Self::WebCategorization => ArtifactCategory::AnalysisResult,
      _ => ArtifactCategory::DataArtifact,
    }
  }
}

/// What a record represents. Content entities sit beside the artifact kinds.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(tag = "type", content = "artifact", rename_all = "snake_case")]
pub enum RecordKind {
  Case,
  DataSource,
  File,
  FileSystem,
  Volume,
  VolumeSystem,
  Pool,
  ContentTag,
  Artifact(ArtifactKind),
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Case => f.write_str("case"),
      Self::DataSource => f.write_str("data_source"),
      Self::File => f.write_str("file"),
      Self::FileSystem => f.write_str("file_system"),
      Self::Volume => f.write_str("volume"),
      Self::VolumeSystem => f.write_str("volume_system"),
      Self::Pool => f.write_str("pool"),
      Self::ContentTag => f.write_str("content_tag"),
      Self::Artifact(kind) => write!(f, "artifact:{kind}"),
    }
  }
}

// ─── Attribute types ─────────────────────────────────────────────────────────

/// The storage shape of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
  Text,
  Integer,
  Long,
  Double,
  DateTime,
  Json,
}

/// Every attribute type the engine reads or writes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeType {
  // ── Naming and free text ────────────────────────────────────────────────
  Name,
  NamePerson,
  DisplayName,
  UserName,
  UserId,
  Description,
  Comment,
  Text,
  Value,
  SetName,
  Category,
  Flag,
  Groups,
  Owner,
  Organization,
  Version,
  Location,
  CalendarEntryType,
  Direction,
  MessageType,
  ThreadId,
  Id,

  // ── Web ─────────────────────────────────────────────────────────────────
  Url,
  Domain,
  Headers,
  ProgName,

  // ── Paths ───────────────────────────────────────────────────────────────
  Path,
  PathSource,
  RemotePath,
  LocalPath,
  TempDir,

  // ── Email ───────────────────────────────────────────────────────────────
  Email,
  EmailHome,
  EmailOffice,
  EmailFrom,
  EmailTo,
  EmailCc,
  EmailBcc,
  EmailReplyto,
  EmailContentHtml,
  EmailContentRtf,
  EmailContentPlain,
  MsgId,
  Subject,

  // ── Telephony ───────────────────────────────────────────────────────────
  PhoneNumber,
  PhoneNumberHome,
  PhoneNumberOffice,
  PhoneNumberMobile,
  PhoneNumberFrom,
  PhoneNumberTo,
  ReadStatus,

  // ── Accounts ────────────────────────────────────────────────────────────
  AccountType,
  Password,
  CardNumber,

  // ── Devices ─────────────────────────────────────────────────────────────
  DeviceMake,
  DeviceModel,
  DeviceId,
  DeviceName,
  MacAddress,
  Ssid,
  Imei,
  Iccid,
  Imsi,
  ProductId,
  ProcessorArchitecture,

  // ── Hashes ──────────────────────────────────────────────────────────────
  HashPhotoDna,
  Md5Hash,

  // ── Counters and links ──────────────────────────────────────────────────
  Count,
  AssociatedArtifact,
  TlEventType,

  // ── Geolocation ─────────────────────────────────────────────────────────
  GeoLatitude,
  GeoLongitude,
  GeoAltitude,
  GeoTrackpoints,
  GeoWaypoints,

  // ── Timestamps ──────────────────────────────────────────────────────────
  Datetime,
  DatetimeCreated,
  DatetimeAccessed,
  DatetimeModified,
  DatetimeStart,
  DatetimeEnd,
  DatetimeRcvd,
  DatetimeSent,
  LastPrintedDatetime,

  // ── Structured payloads ─────────────────────────────────────────────────
  Attachments,

  // ── Content entities ────────────────────────────────────────────────────
  Size,
  MimeType,
  Extension,
  IsDirectory,
  FsType,
  BlockSize,
  Length,
  CaseDirectory,
  DatabaseName,
  DbType,
  TagName,
}

impl AttributeType {
  /// The value shape this attribute type stores.
  pub fn value_type(self) -> ValueType {
    use AttributeType::*;
    match self {
      ReadStatus | Count | IsDirectory => ValueType::Integer,
      AssociatedArtifact | TlEventType | Size | BlockSize | Length => {
        ValueType::Long
      }
      GeoLatitude | GeoLongitude | GeoAltitude => ValueType::Double,
      Datetime | DatetimeCreated | DatetimeAccessed | DatetimeModified
      | DatetimeStart | DatetimeEnd | DatetimeRcvd | DatetimeSent
      | LastPrintedDatetime => ValueType::DateTime,
      GeoTrackpoints | GeoWaypoints | Attachments => ValueType::Json,
      _ => ValueType::Text,
    }
  }
}

// ─── Attribute values ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
  Text(String),
  Integer(i32),
  Long(i64),
  Double(f64),
  /// Seconds since the Unix epoch.
  DateTime(i64),
  Json(serde_json::Value),
}

impl AttributeValue {
  pub fn value_type(&self) -> ValueType {
    match self {
      Self::Text(_) => ValueType::Text,
      Self::Integer(_) => ValueType::Integer,
      Self::Long(_) => ValueType::Long,
      Self::Double(_) => ValueType::Double,
      Self::DateTime(_) => ValueType::DateTime,
      Self::Json(_) => ValueType::Json,
    }
  }
}

/// One typed value on a record, tagged with the module that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
  #[serde(rename = "attribute")]
  pub attr_type: AttributeType,
  pub source:    String,
  pub value:     AttributeValue,
}

impl Attribute {
  pub fn new(
    attr_type: AttributeType,
    source: impl Into<String>,
    value: AttributeValue,
  ) -> Self {
    Self {
      attr_type,
      source: source.into(),
      value,
    }
  }

  /// Reject a value whose shape does not match its attribute type.
  pub fn validate(&self) -> Result<()> {
    let expected = self.attr_type.value_type();
    let found = self.value.value_type();
    if expected == found {
      Ok(())
    } else {
      Err(Error::ValueTypeMismatch {
        attribute: self.attr_type,
        expected,
        found,
      })
    }
  }
}

// ─── ArtifactRecord ──────────────────────────────────────────────────────────

/// A stored entity: kind, optional structural parent, and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
  pub id:     RecordId,
  pub kind:   RecordKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parent: Option<RecordId>,
  #[serde(default, deserialize_with = "deserialize_attributes")]
  attributes: Vec<Attribute>,
}

impl ArtifactRecord {
  pub fn new(
    id: RecordId,
    kind: RecordKind,
    parent: Option<RecordId>,
    attributes: Vec<Attribute>,
  ) -> Self {
    Self {
      id,
      kind,
      parent,
      attributes: unique_by_type(attributes),
    }
  }

  /// Attributes ordered by type, one per type.
  pub fn attributes(&self) -> &[Attribute] {
    &self.attributes
  }

  pub fn attribute(&self, attr_type: AttributeType) -> Option<&Attribute> {
    self
      .attributes
      .binary_search_by(|a| a.attr_type.cmp(&attr_type))
      .ok()
      .map(|i| &self.attributes[i])
  }

  pub fn text(&self, attr_type: AttributeType) -> Option<&str> {
    match &self.attribute(attr_type)?.value {
      AttributeValue::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn integer(&self, attr_type: AttributeType) -> Option<i32> {
    match self.attribute(attr_type)?.value {
      AttributeValue::Integer(v) => Some(v),
      _ => None,
    }
  }

  pub fn long(&self, attr_type: AttributeType) -> Option<i64> {
    match self.attribute(attr_type)?.value {
      AttributeValue::Long(v) => Some(v),
      _ => None,
    }
  }

  pub fn double(&self, attr_type: AttributeType) -> Option<f64> {
    match self.attribute(attr_type)?.value {
      AttributeValue::Double(v) => Some(v),
      _ => None,
    }
  }

  /// Epoch seconds of a date-time attribute.
  pub fn datetime(&self, attr_type: AttributeType) -> Option<i64> {
    match self.attribute(attr_type)?.value {
      AttributeValue::DateTime(v) => Some(v),
      _ => None,
    }
  }

  pub fn json(&self, attr_type: AttributeType) -> Option<&serde_json::Value> {
    match &self.attribute(attr_type)?.value {
      AttributeValue::Json(v) => Some(v),
      _ => None,
    }
  }
}

fn unique_by_type(attributes: Vec<Attribute>) -> Vec<Attribute> {
  let mut by_type = BTreeMap::new();
  for attribute in attributes {
    by_type.insert(attribute.attr_type, attribute);
  }
  by_type.into_values().collect()
}

fn deserialize_attributes<'de, D>(
  deserializer: D,
) -> std::result::Result<Vec<Attribute>, D::Error>
where
  D: Deserializer<'de>,
{
  Vec::<Attribute>::deserialize(deserializer).map(unique_by_type)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(attr_type: AttributeType, value: &str) -> Attribute {
    Attribute::new(attr_type, "test", AttributeValue::Text(value.into()))
  }

  #[test]
  fn later_attribute_of_same_type_wins() {
    let record = ArtifactRecord::new(
      RecordId(1),
      RecordKind::Artifact(ArtifactKind::WebBookmark),
      None,
      vec![
        text(AttributeType::Url, "https://old.example"),
        text(AttributeType::Name, "Example"),
        text(AttributeType::Url, "https://new.example"),
      ],
    );

    assert_eq!(record.attributes().len(), 2);
    assert_eq!(record.text(AttributeType::Url), Some("https://new.example"));
    assert_eq!(record.text(AttributeType::Name), Some("Example"));
  }

  #[test]
  fn typed_accessor_ignores_other_shapes() {
    let record = ArtifactRecord::new(
      RecordId(1),
      RecordKind::Artifact(ArtifactKind::ProgRun),
      None,
      vec![Attribute::new(
        AttributeType::Count,
        "test",
        AttributeValue::Integer(3),
      )],
    );

    assert_eq!(record.integer(AttributeType::Count), Some(3));
    assert_eq!(record.long(AttributeType::Count), None);
    assert_eq!(record.text(AttributeType::ProgName), None);
  }

  #[test]
  fn validate_rejects_mismatched_value() {
    let bad = Attribute::new(
      AttributeType::DatetimeCreated,
      "test",
      AttributeValue::Text("yesterday".into()),
    );
    let Err(Error::ValueTypeMismatch { expected, found, .. }) = bad.validate()
    else {
      panic!("expected a value type mismatch")
    };
    assert_eq!(expected, ValueType::DateTime);
    assert_eq!(found, ValueType::Text);
  }

  #[test]
  fn deserialised_record_is_normalised() {
    let json = serde_json::json!({
      "id": 7,
      "kind": { "type": "artifact", "artifact": "web_history" },
      "attributes": [
        { "attribute": "url", "source": "a", "value": { "text": "x" } },
        { "attribute": "url", "source": "b", "value": { "text": "y" } },
      ],
    });
    let record: ArtifactRecord = serde_json::from_value(json).unwrap();
    assert_eq!(record.kind, RecordKind::Artifact(ArtifactKind::WebHistory));
    assert_eq!(record.attributes().len(), 1);
    assert_eq!(record.text(AttributeType::Url), Some("y"));
  }

  #[test]
  fn analysis_kinds_are_categorised() {
    assert_eq!(
      ArtifactKind::HashsetHit.category(),
      ArtifactCategory::AnalysisResult
    );
    assert_eq!(
      ArtifactKind::WebBookmark.category(),
      ArtifactCategory::DataArtifact
    );
  }

  #[test]
  fn record_kind_display() {
    assert_eq!(
      RecordKind::Artifact(ArtifactKind::GpsLastKnownLocation).to_string(),
      "artifact:gps_last_known_location"
    );
    assert_eq!(RecordKind::VolumeSystem.to_string(), "volume_system");
  }
}
