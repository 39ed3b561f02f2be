//! Structured payloads carried inside JSON attributes.
//!
//! The field names follow the JSON shape forensic tools already write for
//! these attributes, so records produced elsewhere decode unchanged.

use serde::{Deserialize, Serialize};

// ─── Geolocation ─────────────────────────────────────────────────────────────

/// One sample along a recorded track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPoint {
  pub latitude:           f64,
  pub longitude:          f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub altitude:           Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:               Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub velocity:           Option<f64>,
  #[serde(
    rename = "distanceFromHP",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub distance_from_home: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub distance_traveled:  Option<f64>,
  /// Seconds since the Unix epoch.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp:          Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoTrackPoints {
  #[serde(rename = "pointList", default)]
  pub points: Vec<TrackPoint>,
}

/// One stop along a planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
  pub latitude:  f64,
  pub longitude: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub altitude:  Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:      Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoWaypoints {
  #[serde(rename = "pointList", default)]
  pub points: Vec<Waypoint>,
}

// ─── Message attachments ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
  pub path_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub obj_id:    Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAttachment {
  pub url_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachments {
  #[serde(default)]
  pub file_attachments: Vec<FileAttachment>,
  #[serde(default)]
  pub url_attachments:  Vec<UrlAttachment>,
}

impl MessageAttachments {
  /// Where each attachment lives: URL attachments first, then files.
  pub fn locations(&self) -> impl Iterator<Item = &str> {
    self
      .url_attachments
      .iter()
      .map(|u| u.url_string.as_str())
      .chain(self.file_attachments.iter().map(|f| f.path_name.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn track_points_use_point_list() {
    let json = serde_json::json!({
      "pointList": [
        { "latitude": 47.6, "longitude": -122.3, "timestamp": 1577836800 },
        { "latitude": 47.7, "longitude": -122.4, "distanceFromHP": 12.5 },
      ]
    });
    let track: GeoTrackPoints = serde_json::from_value(json).unwrap();
    assert_eq!(track.points.len(), 2);
    assert_eq!(track.points[0].timestamp, Some(1577836800));
    assert_eq!(track.points[1].distance_from_home, Some(12.5));
  }

  #[test]
  fn attachment_locations_list_urls_first() {
    let attachments = MessageAttachments {
      file_attachments: vec![FileAttachment {
        path_name: "/img/cat.jpg".into(),
        obj_id:    None,
      }],
      url_attachments:  vec![UrlAttachment {
        url_string: "https://example.com/cat".into(),
      }],
    };
    let locations: Vec<_> = attachments.locations().collect();
    assert_eq!(locations, ["https://example.com/cat", "/img/cat.jpg"]);
  }
}
