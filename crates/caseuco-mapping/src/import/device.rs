use caseuco_core::{
  facet::{
    DeviceFacet, LatLongCoordinatesFacet, MacAddressFacet, MobileDeviceFacet,
    SimCardFacet, WirelessNetworkConnectionFacet,
  },
  node::{Node, NodeId, Trace},
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::{
  coerce::{double, text, timestamp},
  query::first,
};

fn mac_address(trace: &Trace) -> Option<&str> {
  first::<MacAddressFacet>(trace).and_then(|(_, m)| m.value.as_deref())
}

pub(super) fn device_attached(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, device) = first::<DeviceFacet>(trace)?;
  if device.device_id.is_none()
    && device.manufacturer.is_none()
    && device.model.is_none()
  {
    return None;
  }

  Some(RecordDraft::new(ArtifactKind::DeviceAttached, [
    text(A::DeviceMake, device.manufacturer.as_deref()),
    text(A::DeviceModel, device.model.as_deref()),
    text(A::DeviceId, device.device_id.as_deref()),
    text(A::MacAddress, mac_address(trace)),
    timestamp(A::Datetime, trace.core.created_time.as_deref()),
  ]))
}

pub(super) fn bluetooth_pairing(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let name = first::<MobileDeviceFacet>(trace)?
    .1
    .bluetooth_device_name
    .as_deref()?;

  Some(RecordDraft::new(ArtifactKind::BluetoothPairing, [
    text(A::DeviceName, Some(name)),
    text(A::MacAddress, mac_address(trace)),
    timestamp(A::Datetime, trace.core.created_time.as_deref()),
  ]))
}

pub(super) fn wifi_network(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (facet, connection) = first::<WirelessNetworkConnectionFacet>(trace)?;
  let ssid = connection.ssid.as_deref()?;
  let device_id = facet
    .id
    .as_deref()
    .map(|id| id.strip_prefix(NodeId::BLANK_PREFIX).unwrap_or(id));

  Some(RecordDraft::new(ArtifactKind::WifiNetwork, [
    text(A::Ssid, Some(ssid)),
    timestamp(A::Datetime, facet.core.created_time.as_deref()),
    text(A::DeviceId, device_id),
  ]))
}

/// A device info trace always carries a mobile-device facet, even without an
/// IMEI. A SIM card facet on its own is a SIM attachment.
pub(super) fn device_info(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, mobile) = first::<MobileDeviceFacet>(trace)?;
  let imei = mobile.imei.as_deref();
  let sim = first::<SimCardFacet>(trace).map(|(_, s)| s);
  let iccid = sim.and_then(|s| s.iccid.as_deref());
  let imsi = sim.and_then(|s| s.imsi.as_deref());
  if imei.is_none() && iccid.is_none() && imsi.is_none() {
    return None;
  }

  Some(RecordDraft::new(ArtifactKind::DeviceInfo, [
    text(A::Imei, imei),
    text(A::Iccid, iccid),
    text(A::Imsi, imsi),
  ]))
}

pub(super) fn sim_attached(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, sim) = first::<SimCardFacet>(trace)?;
  if sim.iccid.is_none() && sim.imsi.is_none() {
    return None;
  }

  Some(RecordDraft::new(ArtifactKind::SimAttached, [
    text(A::Iccid, sim.iccid.as_deref()),
    text(A::Imsi, sim.imsi.as_deref()),
  ]))
}

/// Both adapter kinds share this shape, so a first-match import always reads
/// an adapter back as a Bluetooth adapter.
fn mac_adapter(node: &Node, kind: ArtifactKind) -> Option<RecordDraft> {
  let mac = mac_address(node.as_trace()?)?;
  Some(RecordDraft::new(kind, [text(A::MacAddress, Some(mac))]))
}

pub(super) fn bluetooth_adapter(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  mac_adapter(node, ArtifactKind::BluetoothAdapter)
}

pub(super) fn wifi_network_adapter(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  mac_adapter(node, ArtifactKind::WifiNetworkAdapter)
}

pub(super) fn metadata_exif(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, device) = first::<DeviceFacet>(trace)?;
  let (_, coordinates) = first::<LatLongCoordinatesFacet>(trace)?;

  Some(RecordDraft::new(ArtifactKind::MetadataExif, [
    text(A::DeviceMake, device.manufacturer.as_deref()),
    text(A::DeviceModel, device.model.as_deref()),
    double(A::GeoLatitude, coordinates.latitude),
    double(A::GeoLongitude, coordinates.longitude),
    double(A::GeoAltitude, coordinates.altitude),
    timestamp(A::DatetimeCreated, trace.core.created_time.as_deref()),
  ]))
}
