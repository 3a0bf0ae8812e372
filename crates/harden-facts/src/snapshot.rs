use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Reason recorded for a host that never got a fact document.
pub const NO_FACT_DOCUMENT: &str = "no fact document collected";

/// Facts captured for one host before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FactSnapshot {
  /// The raw fact tree.
  Available { facts: serde_json::Value },

  /// No usable facts for this host.
  Unavailable { reason: String },
}

impl FactSnapshot {
  /// Snapshot for a host that has no fact document at all.
  pub fn missing() -> Self {
    Self::Unavailable {
      reason: NO_FACT_DOCUMENT.to_string(),
    }
  }

  pub fn is_available(&self) -> bool {
    matches!(self, Self::Available { .. })
  }

  /// The fact tree, if available.
  pub fn facts(&self) -> Option<&serde_json::Value> {
    match self {
      Self::Available { facts } => Some(facts),
      Self::Unavailable { .. } => None,
    }
  }
}

/// All fact snapshots of a run, keyed by host identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSet {
  snapshots: BTreeMap<String, Arc<FactSnapshot>>,
}

impl FactSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace the snapshot for a host.
  pub fn insert(&mut self, host: impl Into<String>, snapshot: FactSnapshot) {
    self.snapshots.insert(host.into(), Arc::new(snapshot));
  }

  /// Shared handle to a host's snapshot.
  pub fn get(&self, host: &str) -> Option<&Arc<FactSnapshot>> {
    self.snapshots.get(host)
  }

  /// Hosts in identifier order.
  pub fn hosts(&self) -> impl Iterator<Item = &str> {
    self.snapshots.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.snapshots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.snapshots.is_empty()
  }
}
