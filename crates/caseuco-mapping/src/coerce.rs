//! Conversions between graph property values and typed record attributes.
//!
//! Absent, empty, or unparsable inputs yield `None` and the attribute is
//! left off the record. JSON payloads are the only values that can fail a
//! call outright.

use caseuco_core::record::{Attribute, AttributeType, AttributeValue};
use chrono::{DateTime, SecondsFormat};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Source tag stamped on every attribute the importer creates.
pub const SOURCE: &str = "Case Uco Importer";

fn attribute(attr_type: AttributeType, value: AttributeValue) -> Attribute {
  Attribute::new(attr_type, SOURCE, value)
}

pub fn text(attr_type: AttributeType, value: Option<&str>) -> Option<Attribute> {
  let value = value.filter(|v| !v.is_empty())?;
  Some(attribute(attr_type, AttributeValue::Text(value.to_string())))
}

pub fn integer(attr_type: AttributeType, value: Option<i32>) -> Option<Attribute> {
  Some(attribute(attr_type, AttributeValue::Integer(value?)))
}

pub fn long(attr_type: AttributeType, value: Option<i64>) -> Option<Attribute> {
  Some(attribute(attr_type, AttributeValue::Long(value?)))
}

pub fn double(attr_type: AttributeType, value: Option<f64>) -> Option<Attribute> {
  Some(attribute(attr_type, AttributeValue::Double(value?)))
}

/// A date-time attribute from an ISO-8601 string.
pub fn timestamp(attr_type: AttributeType, iso: Option<&str>) -> Option<Attribute> {
  let seconds = epoch_seconds(iso?)?;
  Some(attribute(attr_type, AttributeValue::DateTime(seconds)))
}

/// Serialise `payload` into a JSON attribute.
pub fn json<T: Serialize>(
  attr_type: AttributeType,
  payload: &T,
) -> Result<Attribute> {
  let value = serde_json::to_value(payload).map_err(|source| {
    Error::MalformedPayload {
      attribute: attr_type,
      source,
    }
  })?;
  Ok(attribute(attr_type, AttributeValue::Json(value)))
}

/// Decode the JSON payload of a record attribute.
pub fn decode<T: DeserializeOwned>(
  attr_type: AttributeType,
  value: &serde_json::Value,
) -> Result<T> {
  T::deserialize(value).map_err(|source| Error::MalformedPayload {
    attribute: attr_type,
    source,
  })
}

/// Epoch seconds of an ISO-8601 timestamp. Any offset is honoured.
pub fn epoch_seconds(iso: &str) -> Option<i64> {
  match DateTime::parse_from_rfc3339(iso) {
    Ok(parsed) => Some(parsed.timestamp()),
    Err(err) => {
      tracing::debug!(value = iso, error = %err, "dropping unparsable timestamp");
      None
    }
  }
}

/// `YYYY-MM-DDTHH:MM:SSZ` for an epoch-seconds value.
pub fn iso_timestamp(seconds: i64) -> Option<String> {
  DateTime::from_timestamp(seconds, 0)
    .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
  use caseuco_core::record::AttributeType;

  use super::*;

  #[test]
  fn empty_text_is_absent() {
    assert!(text(AttributeType::Url, Some("")).is_none());
    assert!(text(AttributeType::Url, None).is_none());
    let Some(attr) = text(AttributeType::Url, Some("https://example.com")) else {
      panic!("expected an attribute")
    };
    assert_eq!(attr.source, SOURCE);
    assert_eq!(attr.value, AttributeValue::Text("https://example.com".into()));
  }

  #[test]
  fn timestamps_parse_to_epoch_seconds() {
    let attr = timestamp(AttributeType::Datetime, Some("2020-01-01T00:00:00Z"));
    assert_eq!(attr.map(|a| a.value), Some(AttributeValue::DateTime(1_577_836_800)));
  }

  #[test]
  fn offsets_are_normalised() {
    assert_eq!(epoch_seconds("2020-01-01T02:00:00+02:00"), Some(1_577_836_800));
  }

  #[test]
  fn unparsable_timestamp_is_dropped() {
    assert!(timestamp(AttributeType::Datetime, Some("yesterday")).is_none());
  }

  #[test]
  fn iso_timestamp_uses_zulu_seconds() {
    assert_eq!(
      iso_timestamp(1_577_836_800).as_deref(),
      Some("2020-01-01T00:00:00Z")
    );
  }

  #[test]
  fn bad_payload_is_reported() {
    let value = serde_json::json!({ "pointList": "nope" });
    let result = decode::<caseuco_core::payload::GeoWaypoints>(
      AttributeType::GeoWaypoints,
      &value,
    );
    let Err(Error::MalformedPayload { attribute, .. }) = result else {
      panic!("expected a malformed payload error")
    };
    assert_eq!(attribute, AttributeType::GeoWaypoints);
  }
}
