//! GPS bookmarks, fixes, routes and tracks.

use caseuco_core::{
  facet::{ApplicationFacet, Facet, FacetBody, LatLongCoordinatesFacet},
  payload::{GeoTrackPoints, GeoWaypoints},
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::{Result, coerce};

fn coordinates(record: &ArtifactRecord) -> LatLongCoordinatesFacet {
  LatLongCoordinatesFacet {
    latitude:  record.double(A::GeoLatitude),
    longitude: record.double(A::GeoLongitude),
    altitude:  record.double(A::GeoAltitude),
  }
}

fn address(record: &ArtifactRecord) -> Facet {
  Facet::new(FacetBody::SimpleAddress).with_description(record.string(A::Location))
}

fn application(record: &ArtifactRecord) -> ApplicationFacet {
  ApplicationFacet {
    application_identifier: record.string(A::ProgName),
    ..Default::default()
  }
}

pub(super) fn gps_bookmark(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(coordinates(record))
    .with_facet(application(record))
    .with_facet(address(record));
  trace.core.name = record.string(A::Name);
  trace.core.created_time = record.iso(A::Datetime);
  asm.primary(trace);
  Ok(())
}

/// A single fix: last known location and search results share this shape.
pub(super) fn gps_point(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(coordinates(record))
    .with_facet(address(record));
  trace.core.created_time = record.iso(A::Datetime);
  asm.primary(trace);

  let location = asm.satellite_location(record.string(A::Name));
  let primary = asm.id.clone();
  asm.link(&location.id, &primary);
  Ok(())
}

pub(super) fn gps_route(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let waypoints = record
    .json(A::GeoWaypoints)
    .map(|value| coerce::decode::<GeoWaypoints>(A::GeoWaypoints, value))
    .transpose()?
    .unwrap_or_default();

  let mut trace = asm
    .trace()
    .with_facet(application(record))
    .with_facet(address(record));
  trace.core.created_time = record.iso(A::Datetime);
  for point in waypoints.points {
    trace = trace.with_facet(
      Facet::from(LatLongCoordinatesFacet {
        latitude:  Some(point.latitude),
        longitude: Some(point.longitude),
        altitude:  point.altitude,
      })
      .with_name(point.name),
    );
  }
  asm.primary(trace);

  let location = asm.satellite_location(record.string(A::Name));
  let primary = asm.id.clone();
  asm.link(&location.id, &primary);
  Ok(())
}

pub(super) fn gps_track(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let track = record
    .json(A::GeoTrackpoints)
    .map(|value| coerce::decode::<GeoTrackPoints>(A::GeoTrackpoints, value))
    .transpose()?
    .unwrap_or_default();

  let mut trace = asm.trace().with_facet(application(record));
  trace.core.name = record.string(A::Name);
  for point in track.points {
    trace = trace.with_facet(
      Facet::from(LatLongCoordinatesFacet {
        latitude:  Some(point.latitude),
        longitude: Some(point.longitude),
        altitude:  point.altitude,
      })
      .with_name(point.name)
      .with_created(point.timestamp.and_then(coerce::iso_timestamp)),
    );
  }
  asm.primary(trace);
  Ok(())
}
