//! Facets: the typed property bundles a [`Trace`](crate::node::Trace) carries.
//!
//! A facet is shared properties ([`CoreProperties`]) plus one concrete
//! [`FacetBody`] shape, tagged on the wire by `@type`. Body structs never
//! repeat a shared property name (`name`, `description`, `tag`,
//! `createdTime`, `modifiedTime`); those always live in the shared block.
//!
//! Fields that point at another node hold a [`NodeRef`].

use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;

use crate::node::{CoreProperties, NodeRef};

// ─── Facet ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
  /// Facet-level identifier. Rarely set; some shapes smuggle a value here.
  #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
  pub id:   Option<String>,
  #[serde(flatten)]
  pub core: CoreProperties,
  #[serde(flatten)]
  pub body: FacetBody,
}

impl Facet {
  pub fn new(body: FacetBody) -> Self {
    Self {
      id: None,
      core: CoreProperties::default(),
      body,
    }
  }

  pub fn kind(&self) -> FacetKind {
    FacetKind::from(&self.body)
  }

  /// The concrete body, if this facet has shape `T`.
  pub fn shape<T: FacetShape>(&self) -> Option<&T> {
    T::project(&self.body)
  }

  pub fn with_id(mut self, id: Option<String>) -> Self {
    self.id = id;
    self
  }

  pub fn with_name(mut self, name: Option<String>) -> Self {
    self.core.name = name;
    self
  }

  pub fn with_description(mut self, description: Option<String>) -> Self {
    self.core.description = description;
    self
  }

  pub fn with_tag(mut self, tag: Option<String>) -> Self {
    self.core.tag = tag;
    self
  }

  pub fn with_created(mut self, created_time: Option<String>) -> Self {
    self.core.created_time = created_time;
    self
  }

  pub fn with_modified(mut self, modified_time: Option<String>) -> Self {
    self.core.modified_time = modified_time;
    self
  }
}

impl From<FacetBody> for Facet {
  fn from(body: FacetBody) -> Self {
    Self::new(body)
  }
}

/// Projection from a [`FacetBody`] to one concrete shape.
pub trait FacetShape: Sized {
  const KIND: FacetKind;

  fn project(body: &FacetBody) -> Option<&Self>;
}

// ─── Web ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_value: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_name:  Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainNameFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserBookmarkFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url_targeted: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application:  Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserCookieFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cookie_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cookie_domain:   Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application:     Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub accessed_time:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expiration_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConnectionFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub http_request_header: Option<String>,
}

// ─── Software ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application_identifier: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version:                Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub number_of_launches:     Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationAccountFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application: Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperatingSystemFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub install_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version:      Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentVariableFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowsRegistryValueFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionArgumentFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub argument_name: Option<String>,
}

// ─── Content ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HashFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hash_method: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hash_value:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDataFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data_payload:               Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mime_type:                  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size_in_bytes:              Option<i64>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub hash:                       Vec<HashFacet>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data_payload_reference_url: Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owner:                      Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_path:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub extension:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_directory:  Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size_in_bytes: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub accessed_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileSystemFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_system_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cluster_size:     Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sector_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathRelationFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedStringFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub string_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

// ─── Devices and hosts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub manufacturer:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub device_id:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MacAddressFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileDeviceFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bluetooth_device_name: Option<String>,
  #[serde(rename = "IMEI", skip_serializing_if = "Option::is_none")]
  pub imei:                  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimCardFacet {
  #[serde(rename = "ICCID", skip_serializing_if = "Option::is_none")]
  pub iccid: Option<String>,
  #[serde(rename = "IMSI", skip_serializing_if = "Option::is_none")]
  pub imsi:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WirelessNetworkConnectionFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ssid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComputerSpecificationFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub host_name:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub processor_architecture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowsComputerSpecificationFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub registered_organization: Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub registered_owner:        Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub windows_temp_directory:  Option<NodeRef>,
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub account_type:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub account_identifier: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub owner:              Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountAuthenticationFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DigitalAccountFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_login_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowsAccountFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub groups: Option<String>,
}

// ─── Communication ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailAddressFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailMessageFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content_type:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub received_time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sent_time:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bcc:           Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cc:            Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from:          Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub to:            Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub header_raw:    Option<NodeRef>,
  #[serde(rename = "messageID", skip_serializing_if = "Option::is_none")]
  pub message_id:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subject:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sender:        Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub in_reply_to:   Option<NodeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneAccountFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message_text: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application:  Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sent_time:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneCallFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from:       Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub to:         Option<NodeRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_time:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub call_type:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmsMessageFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_read: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttachmentFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarEntryFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_time:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:   Option<NodeRef>,
}

// ─── Location ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatLongCoordinatesFacet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub latitude:  Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub longitude: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub altitude:  Option<f64>,
}

// ─── FacetBody ───────────────────────────────────────────────────────────────

/// The concrete shape of a facet. The variant name (or its rename) is the
/// `@type` on the wire.
///
/// Shapes without fields of their own carry everything in the shared block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(FacetKind), derive(Hash, strum::Display))]
#[serde(tag = "@type")]
pub enum FacetBody {
  // ── Web ─────────────────────────────────────────────────────────────────
  #[serde(rename = "URL")]
  Url(UrlFacet),
  DomainName(DomainNameFacet),
  Domain(DomainFacet),
  BrowserBookmark(BrowserBookmarkFacet),
  BrowserCookie(BrowserCookieFacet),
  #[serde(rename = "HTTPConnection")]
  HttpConnection(HttpConnectionFacet),

  // ── Software ────────────────────────────────────────────────────────────
  Application(ApplicationFacet),
  ApplicationAccount(ApplicationAccountFacet),
  Software,
  OperatingSystem(OperatingSystemFacet),
  EnvironmentVariable(EnvironmentVariableFacet),
  WindowsRegistryValue(WindowsRegistryValueFacet),
  ActionArgument(ActionArgumentFacet),

  // ── Content ─────────────────────────────────────────────────────────────
  ContentData(ContentDataFacet),
  File(FileFacet),
  FileSystem(FileSystemFacet),
  Volume(VolumeFacet),
  Hash(HashFacet),
  PathRelation(PathRelationFacet),
  ExtractedString(ExtractedStringFacet),
  Note(NoteFacet),

  // ── Devices and hosts ───────────────────────────────────────────────────
  Device(DeviceFacet),
  #[serde(rename = "MACAddress")]
  MacAddress(MacAddressFacet),
  MobileDevice(MobileDeviceFacet),
  #[serde(rename = "SIMCard")]
  SimCard(SimCardFacet),
  WirelessNetworkConnection(WirelessNetworkConnectionFacet),
  ComputerSpecification(ComputerSpecificationFacet),
  WindowsComputerSpecification(WindowsComputerSpecificationFacet),

  // ── Identities and accounts ─────────────────────────────────────────────
  IdentityFacet,
  Account(AccountFacet),
  AccountAuthentication(AccountAuthenticationFacet),
  DigitalAccount(DigitalAccountFacet),
  WindowsAccount(WindowsAccountFacet),

  // ── Communication ───────────────────────────────────────────────────────
  EmailAddress(EmailAddressFacet),
  EmailMessage(EmailMessageFacet),
  Contact(ContactFacet),
  PhoneAccount(PhoneAccountFacet),
  Message(MessageFacet),
  PhoneCall(PhoneCallFacet),
  #[serde(rename = "SMSMessage")]
  SmsMessage(SmsMessageFacet),
  Attachment(AttachmentFacet),
  CalendarEntry(CalendarEntryFacet),

  // ── Location ────────────────────────────────────────────────────────────
  LatLongCoordinates(LatLongCoordinatesFacet),
  SimpleAddress,
}

macro_rules! facet_shapes {
  ($($variant:ident => $shape:ty),* $(,)?) => {
    $(
      impl FacetShape for $shape {
        const KIND: FacetKind = FacetKind::$variant;

        fn project(body: &FacetBody) -> Option<&Self> {
          match body {
            FacetBody::$variant(inner) => Some(inner),
            _ => None,
          }
        }
      }

      impl From<$shape> for Facet {
        fn from(inner: $shape) -> Self {
          Facet::new(FacetBody::$variant(inner))
        }
      }
    )*
  };
}

facet_shapes! {
  Url => UrlFacet,
  DomainName => DomainNameFacet,
  Domain => DomainFacet,
  BrowserBookmark => BrowserBookmarkFacet,
  BrowserCookie => BrowserCookieFacet,
  HttpConnection => HttpConnectionFacet,
  Application => ApplicationFacet,
  ApplicationAccount => ApplicationAccountFacet,
  OperatingSystem => OperatingSystemFacet,
  EnvironmentVariable => EnvironmentVariableFacet,
  WindowsRegistryValue => WindowsRegistryValueFacet,
  ActionArgument => ActionArgumentFacet,
  ContentData => ContentDataFacet,
  File => FileFacet,
  FileSystem => FileSystemFacet,
  Volume => VolumeFacet,
  Hash => HashFacet,
  PathRelation => PathRelationFacet,
  ExtractedString => ExtractedStringFacet,
  Note => NoteFacet,
  Device => DeviceFacet,
  MacAddress => MacAddressFacet,
  MobileDevice => MobileDeviceFacet,
  SimCard => SimCardFacet,
  WirelessNetworkConnection => WirelessNetworkConnectionFacet,
  ComputerSpecification => ComputerSpecificationFacet,
  WindowsComputerSpecification => WindowsComputerSpecificationFacet,
  Account => AccountFacet,
  AccountAuthentication => AccountAuthenticationFacet,
  DigitalAccount => DigitalAccountFacet,
  WindowsAccount => WindowsAccountFacet,
  EmailAddress => EmailAddressFacet,
  EmailMessage => EmailMessageFacet,
  Contact => ContactFacet,
  PhoneAccount => PhoneAccountFacet,
  Message => MessageFacet,
  PhoneCall => PhoneCallFacet,
  SmsMessage => SmsMessageFacet,
  Attachment => AttachmentFacet,
  CalendarEntry => CalendarEntryFacet,
  LatLongCoordinates => LatLongCoordinatesFacet,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::NodeId;

  #[test]
  fn shared_properties_flatten_beside_body() {
    let facet = Facet::from(BrowserBookmarkFacet {
      url_targeted: Some("https://example.com".into()),
      application:  Some(NodeRef::from(NodeId::from("_:app"))),
    })
    .with_name(Some("Example".into()))
    .with_created(Some("2020-01-01T00:00:00Z".into()));

    let json = serde_json::to_value(&facet).unwrap();
    assert_eq!(json["@type"], "BrowserBookmark");
    assert_eq!(json["name"], "Example");
    assert_eq!(json["createdTime"], "2020-01-01T00:00:00Z");
    assert_eq!(json["urlTargeted"], "https://example.com");
    assert_eq!(json["application"]["@id"], "_:app");

    let back: Facet = serde_json::from_value(json).unwrap();
    assert_eq!(back, facet);
  }

  #[test]
  fn fieldless_shapes_keep_shared_properties() {
    let facet = Facet::new(FacetBody::SimpleAddress)
      .with_description(Some("221B Baker Street".into()));

    let json = serde_json::to_value(&facet).unwrap();
    assert_eq!(json["@type"], "SimpleAddress");
    assert_eq!(json["description"], "221B Baker Street");

    let back: Facet = serde_json::from_value(json).unwrap();
    assert_eq!(back.kind(), FacetKind::SimpleAddress);
    assert_eq!(back.core.description.as_deref(), Some("221B Baker Street"));
  }

  #[test]
  fn renamed_shapes_use_wire_names() {
    let json = serde_json::json!({
      "@type": "SIMCard",
      "ICCID": "8901",
      "IMSI": "3102",
    });
    let facet: Facet = serde_json::from_value(json).unwrap();
    let Some(sim) = facet.shape::<SimCardFacet>() else {
      panic!("expected a SIM card facet")
    };
    assert_eq!(sim.iccid.as_deref(), Some("8901"));
    assert_eq!(sim.imsi.as_deref(), Some("3102"));
  }

  #[test]
  fn facet_id_survives_round_trip() {
    let facet = Facet::from(WirelessNetworkConnectionFacet {
      ssid: Some("home".into()),
    })
    .with_id(Some("_:device-7".into()));

    let json = serde_json::to_string(&facet).unwrap();
    let back: Facet = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id.as_deref(), Some("_:device-7"));
    assert!(back.shape::<MacAddressFacet>().is_none());
  }
}
