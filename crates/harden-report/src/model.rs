//! The aggregated report model.

use std::collections::HashSet;
use std::sync::Arc;

use harden_facts::{FactSnapshot, SystemInfo};
use harden_outcome::{RawFlags, Status, TaskOutcomeRecord};
use serde::{Serialize, Serializer};

use crate::summary::StatusSummary;

/// Where a host's fact snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactSource {
  /// The fact collection phase wrote a document for this host.
  Collected,
  /// Taken from a fact-gathering task in the outcome stream.
  Gathered,
  /// No document anywhere.
  Missing,
}

/// One host's result for one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostRow {
  pub host: String,
  pub status: Status,
  /// Raw changed flag, kept even when the status is not `CHANGED`.
  pub changed: bool,
  pub message: Option<String>,
  /// Shared with the host's [`HostEntry`]; serialized as its state only.
  #[serde(serialize_with = "serialize_fact_state")]
  pub facts: Arc<FactSnapshot>,
}

/// One task and its host rows, in first-seen host order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEntry {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub action: Option<String>,
  pub hosts: Vec<HostRow>,
}

/// Per-host section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostEntry {
  pub host: String,
  pub facts: Arc<FactSnapshot>,
  pub fact_source: FactSource,
  pub system_info: SystemInfo,
}

/// Tasks in first-seen order, each with its hosts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
  pub summary: StatusSummary,
  pub hosts: Vec<HostEntry>,
  pub tasks: Vec<TaskEntry>,
}

impl Report {
  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn task(&self, name: &str) -> Option<&TaskEntry> {
    self.tasks.iter().find(|t| t.name == name)
  }

  pub fn host(&self, host: &str) -> Option<&HostEntry> {
    self.hosts.iter().find(|h| h.host == host)
  }

  /// Every (task, row) pair in report order.
  pub fn rows(&self) -> impl Iterator<Item = (&TaskEntry, &HostRow)> {
    self
      .tasks
      .iter()
      .flat_map(|task| task.hosts.iter().map(move |row| (task, row)))
  }

  /// Flatten the report back into records.
  ///
  /// Facts that came from a fact-gathering task are re-attached to the first
  /// fact-gathering row of their host, so aggregating the result again with the same fact
  /// set reproduces this report.
  pub fn records(&self) -> Vec<TaskOutcomeRecord> {
    let mut gathered: HashSet<&str> = self
      .hosts
      .iter()
      .filter(|h| h.fact_source == FactSource::Gathered)
      .map(|h| h.host.as_str())
      .collect();

    self
      .rows()
      .map(|(task, row)| {
        let mut record = TaskOutcomeRecord {
          task: task.name.clone(),
          action: task.action.clone(),
          host: row.host.clone(),
          flags: RawFlags::from_status(row.status, row.changed),
          message: row.message.clone(),
          facts: None,
        };

        if record.is_fact_gathering() && gathered.remove(row.host.as_str()) {
          record.facts = row.facts.facts().cloned();
        }
        record
      })
      .collect()
  }
}

fn serialize_fact_state<S: Serializer>(
  facts: &Arc<FactSnapshot>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(if facts.is_available() {
    "available"
  } else {
    "unavailable"
  })
}
