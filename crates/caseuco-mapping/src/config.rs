//! Export settings.

use serde::{Deserialize, Serialize};

/// Options recognised by the [`Exporter`](crate::Exporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
  /// Emit a `contained-within` relationship from each exported entity to its
  /// structural parent.
  pub include_parent_child: bool,
}

impl Default for ExportConfig {
  fn default() -> Self {
    Self {
      include_parent_child: true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn containment_defaults_to_enabled() {
    let config: ExportConfig = serde_json::from_str("{}").unwrap();
    assert!(config.include_parent_child);
  }

  #[test]
  fn containment_can_be_disabled() {
    let config: ExportConfig =
      serde_json::from_str(r#"{"include_parent_child": false}"#).unwrap();
    assert!(!config.include_parent_child);
  }
}
