//! Timeline event types, keyed both ways.
//!
//! The table is built once by the caller and handed to the exporter and the
//! importer; nothing consults a store for it.

use std::collections::BTreeMap;

/// A bidirectional display-name / event-type-id table.
#[derive(Debug, Clone, Default)]
pub struct EventTypeTable {
  by_name: BTreeMap<String, i64>,
  by_id:   BTreeMap<i64, String>,
}

impl EventTypeTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// The event types every forensic case starts with.
  pub fn standard() -> Self {
    let mut table = Self::new();
    for (id, name) in [
      (1, "Web Activity"),
      (2, "Other"),
      (3, "File System"),
      (4, "File Modified"),
      (5, "File Accessed"),
      (6, "File Created"),
      (7, "File Changed"),
      (8, "Web Downloads"),
      (9, "Web Cookies"),
      (10, "Web Bookmarks"),
      (11, "Web History"),
      (12, "Web Searches"),
      (13, "Messages"),
      (14, "GPS Routes"),
      (15, "GPS Trackpoint"),
      (16, "Calls"),
      (17, "Email"),
      (18, "Recent Documents"),
      (19, "Installed Programs"),
      (20, "Exif"),
      (21, "Devices Attached"),
      (22, "Program Run"),
      (23, "Bluetooth Pairing"),
      (24, "Calendar Entry"),
      (25, "Service Account"),
      (26, "User Created"),
    ] {
      table.insert(id, name);
    }
    table
  }

  /// Add or replace an entry. A re-used name or id drops the old pairing.
  pub fn insert(&mut self, id: i64, display_name: impl Into<String>) {
    let display_name = display_name.into();
    if let Some(old_name) = self.by_id.insert(id, display_name.clone()) {
      self.by_name.remove(&old_name);
    }
    if let Some(old_id) = self.by_name.insert(display_name, id) {
      if old_id != id {
        self.by_id.remove(&old_id);
      }
    }
  }

  pub fn id_for(&self, display_name: &str) -> Option<i64> {
    self.by_name.get(display_name).copied()
  }

  pub fn display_name(&self, id: i64) -> Option<&str> {
    self.by_id.get(&id).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.by_id.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_id.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookups_work_both_ways() {
    let table = EventTypeTable::standard();
    let id = table.id_for("Web History").unwrap();
    assert_eq!(table.display_name(id), Some("Web History"));
    assert_eq!(table.id_for("No Such Type"), None);
  }

  #[test]
  fn reinsert_replaces_both_directions() {
    let mut table = EventTypeTable::new();
    table.insert(1, "Old");
    table.insert(1, "New");
    assert_eq!(table.len(), 1);
    assert_eq!(table.id_for("Old"), None);
    assert_eq!(table.display_name(1), Some("New"));

    table.insert(2, "New");
    assert_eq!(table.len(), 1);
    assert_eq!(table.display_name(1), None);
    assert_eq!(table.id_for("New"), Some(2));
  }
}
