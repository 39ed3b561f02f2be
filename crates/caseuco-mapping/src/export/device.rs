//! Attached devices, radios, SIM cards and camera metadata.

use caseuco_core::{
  facet::{
    DeviceFacet, Facet, LatLongCoordinatesFacet, MacAddressFacet,
    MobileDeviceFacet, SimCardFacet, WirelessNetworkConnectionFacet,
  },
  node::NodeId,
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::Result;

fn mac_address(record: &ArtifactRecord) -> MacAddressFacet {
  MacAddressFacet {
    value: record.string(A::MacAddress),
  }
}

pub(super) fn device_attached(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(DeviceFacet {
      manufacturer: record.string(A::DeviceMake),
      model: record.string(A::DeviceModel),
      device_id: record.string(A::DeviceId),
      ..Default::default()
    })
    .with_facet(mac_address(record));
  trace.core.created_time = record.iso(A::Datetime);
  asm.primary(trace);
  Ok(())
}

pub(super) fn bluetooth_pairing(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(MobileDeviceFacet {
      bluetooth_device_name: record.string(A::DeviceName),
      ..Default::default()
    })
    .with_facet(mac_address(record));
  trace.core.created_time = record.iso(A::Datetime);
  asm.primary(trace);
  Ok(())
}

/// The device id rides in the facet `@id` as a blank id.
pub(super) fn wifi_network(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let connection = Facet::from(WirelessNetworkConnectionFacet {
    ssid: record.string(A::Ssid),
  })
  .with_created(record.iso(A::Datetime))
  .with_id(
    record
      .text(A::DeviceId)
      .map(|id| format!("{}{id}", NodeId::BLANK_PREFIX)),
  );
  asm.primary(asm.trace().with_facet(connection));
  Ok(())
}

pub(super) fn device_info(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(MobileDeviceFacet {
      imei: record.string(A::Imei),
      ..Default::default()
    })
    .with_facet(SimCardFacet {
      iccid: record.string(A::Iccid),
      imsi:  record.string(A::Imsi),
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn sim_attached(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace().with_facet(SimCardFacet {
    iccid: record.string(A::Iccid),
    imsi:  record.string(A::Imsi),
  }));
  Ok(())
}

/// Bluetooth and Wi-Fi adapters: a MAC address and nothing else.
pub(super) fn mac_adapter(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace().with_facet(mac_address(record)));
  Ok(())
}

pub(super) fn metadata_exif(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(DeviceFacet {
      manufacturer: record.string(A::DeviceMake),
      model: record.string(A::DeviceModel),
      ..Default::default()
    })
    .with_facet(LatLongCoordinatesFacet {
      latitude:  record.double(A::GeoLatitude),
      longitude: record.double(A::GeoLongitude),
      altitude:  record.double(A::GeoAltitude),
    });
  trace.core.created_time = record.iso(A::DatetimeCreated);
  asm.primary(trace);
  Ok(())
}
