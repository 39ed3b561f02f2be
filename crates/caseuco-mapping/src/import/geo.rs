use caseuco_core::{
  facet::{ApplicationFacet, FacetKind, LatLongCoordinatesFacet},
  node::{Node, NodeKind, Trace},
  payload::{GeoTrackPoints, GeoWaypoints, TrackPoint, Waypoint},
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::{
  Result,
  coerce::{self, double, json, text, timestamp},
  query::{all, first, first_facet_of_kind},
};

fn address(trace: &Trace) -> Option<&str> {
  first_facet_of_kind(trace, FacetKind::SimpleAddress)?
    .core
    .description
    .as_deref()
}

fn program(trace: &Trace) -> Option<&str> {
  first::<ApplicationFacet>(trace)
    .and_then(|(_, a)| a.application_identifier.as_deref())
}

/// Name of the first named location linked to `trace`.
fn location_name<'a>(trace: &Trace, cx: &ImportContext<'a>) -> Option<&'a str> {
  cx.linked(&trace.id, NodeKind::Location)
    .into_iter()
    .find_map(|location| location.core().name.as_deref())
}

/// A bookmark has no linked location node; that is what tells it apart from
/// a route.
pub(super) fn gps_bookmark(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, coordinates) = first::<LatLongCoordinatesFacet>(trace)?;
  first::<ApplicationFacet>(trace)?;
  first_facet_of_kind(trace, FacetKind::SimpleAddress)?;
  if !cx.linked(&trace.id, NodeKind::Location).is_empty() {
    return None;
  }

  Some(RecordDraft::new(ArtifactKind::GpsBookmark, [
    double(A::GeoLatitude, coordinates.latitude),
    double(A::GeoLongitude, coordinates.longitude),
    double(A::GeoAltitude, coordinates.altitude),
    text(A::ProgName, program(trace)),
    text(A::Location, address(trace)),
    timestamp(A::Datetime, trace.core.created_time.as_deref()),
    text(A::Name, trace.core.name.as_deref()),
  ]))
}

fn gps_point(
  node: &Node,
  cx: &ImportContext<'_>,
  kind: ArtifactKind,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, coordinates) = first::<LatLongCoordinatesFacet>(trace)?;

  Some(RecordDraft::new(kind, [
    double(A::GeoLatitude, coordinates.latitude),
    double(A::GeoLongitude, coordinates.longitude),
    double(A::GeoAltitude, coordinates.altitude),
    timestamp(A::Datetime, trace.core.created_time.as_deref()),
    text(A::Name, location_name(trace, cx)),
    text(A::Location, address(trace)),
  ]))
}

pub(super) fn gps_last_known_location(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  gps_point(node, cx, ArtifactKind::GpsLastKnownLocation)
}

pub(super) fn gps_search(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  gps_point(node, cx, ArtifactKind::GpsSearch)
}

pub(super) fn gps_route(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Result<Option<RecordDraft>> {
  let Some(trace) = node.as_trace() else {
    return Ok(None);
  };
  let Some(program) = program(trace) else {
    return Ok(None);
  };
  if first_facet_of_kind(trace, FacetKind::SimpleAddress).is_none() {
    return Ok(None);
  }

  let points: Vec<Waypoint> = all::<LatLongCoordinatesFacet>(trace)
    .into_iter()
    .filter_map(|(facet, c)| {
      Some(Waypoint {
        latitude:  c.latitude?,
        longitude: c.longitude?,
        altitude:  c.altitude,
        name:      facet.core.name.clone(),
      })
    })
    .collect();
  let waypoints = if points.is_empty() {
    None
  } else {
    Some(json(A::GeoWaypoints, &GeoWaypoints { points })?)
  };

  Ok(Some(RecordDraft::new(ArtifactKind::GpsRoute, [
    text(A::ProgName, Some(program)),
    text(A::Location, address(trace)),
    timestamp(A::Datetime, trace.core.created_time.as_deref()),
    text(A::Name, location_name(trace, cx)),
    waypoints,
  ])))
}

pub(super) fn gps_track(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Result<Option<RecordDraft>> {
  let Some(trace) = node.as_trace() else {
    return Ok(None);
  };
  let coordinates = all::<LatLongCoordinatesFacet>(trace);
  let Some(program) = program(trace) else {
    return Ok(None);
  };
  if coordinates.is_empty() {
    return Ok(None);
  }

  let points: Vec<TrackPoint> = coordinates
    .into_iter()
    .filter_map(|(facet, c)| {
      Some(TrackPoint {
        latitude:           c.latitude?,
        longitude:          c.longitude?,
        altitude:           c.altitude,
        name:               facet.core.name.clone(),
        velocity:           None,
        distance_from_home: None,
        distance_traveled:  None,
        timestamp:          facet
          .core
          .created_time
          .as_deref()
          .and_then(coerce::epoch_seconds),
      })
    })
    .collect();

  Ok(Some(RecordDraft::new(ArtifactKind::GpsTrack, [
    text(A::Name, trace.core.name.as_deref()),
    text(A::ProgName, Some(program)),
    Some(json(A::GeoTrackpoints, &GeoTrackPoints { points })?),
  ])))
}
