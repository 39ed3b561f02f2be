//! Error types for `caseuco-core`.

use thiserror::Error;

use crate::record::{AttributeType, RecordId, ValueType};

#[derive(Debug, Error)]
pub enum Error {
  #[error("record not found: {0}")]
  RecordNotFound(RecordId),

  #[error("record {0} already exists")]
  DuplicateRecord(RecordId),

  #[error("attribute {attribute} holds a {found} value, expected {expected}")]
  ValueTypeMismatch {
    attribute: AttributeType,
    expected:  ValueType,
    found:     ValueType,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
