//! Error types for the caseuco-mapping engine.

use caseuco_core::record::{AttributeType, RecordId, RecordKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record store could not be read or written. Aborts the current call.
  #[error("record store failure: {0}")]
  DataAccess(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("record {id} ({kind}) has no graph representation")]
  NotExportable { id: RecordId, kind: RecordKind },

  #[error("malformed {attribute} payload: {source}")]
  MalformedPayload {
    attribute: AttributeType,
    source:    serde_json::Error,
  },
}

impl Error {
  pub fn data_access<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::DataAccess(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
