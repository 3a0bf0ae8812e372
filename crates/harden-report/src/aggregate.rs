//! Merging outcome records with fact snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use harden_facts::{FactSet, FactSnapshot, SystemInfo};
use harden_outcome::TaskOutcomeRecord;
use tracing::debug;

use crate::model::{FactSource, HostEntry, HostRow, Report, TaskEntry};
use crate::summary::StatusSummary;

/// Build a report from records in stream order and the run's fact set.
///
/// - Tasks are keyed by name and kept in first-seen order; hosts within a
///   task likewise.
/// - A repeated (task, host) pair overwrites the earlier row in place.
/// - The host section lists hosts in the order they first appear in the
///   task table, then hosts that only have fact snapshots.
/// - A host without a usable snapshot takes the fact tree embedded in its
///   first fact-gathering record, if any. Facts returned by other modules
///   are ignored.
pub fn aggregate(
  records: impl IntoIterator<Item = TaskOutcomeRecord>,
  facts: &FactSet,
) -> Report {
  let records: Vec<TaskOutcomeRecord> = records.into_iter().collect();

  let mut gathered: HashMap<&str, &serde_json::Value> = HashMap::new();
  for record in &records {
    if let (true, Some(tree)) = (record.is_fact_gathering(), &record.facts) {
      gathered.entry(record.host.as_str()).or_insert(tree);
    }
  }

  let mut resolved: HashMap<String, (Arc<FactSnapshot>, FactSource)> = HashMap::new();
  let mut resolve = |host: &str| -> Arc<FactSnapshot> {
    resolved
      .entry(host.to_string())
      .or_insert_with(|| resolve_snapshot(host, facts, gathered.get(host).copied()))
      .0
      .clone()
  };

  let mut tasks: Vec<TaskEntry> = Vec::new();
  let mut task_index: HashMap<String, usize> = HashMap::new();
  let mut row_index: HashMap<(usize, String), usize> = HashMap::new();

  for record in &records {
    let t = match task_index.get(&record.task) {
      Some(&t) => t,
      None => {
        tasks.push(TaskEntry {
          name: record.task.clone(),
          action: None,
          hosts: Vec::new(),
        });
        task_index.insert(record.task.clone(), tasks.len() - 1);
        tasks.len() - 1
      }
    };

    let task = &mut tasks[t];
    if task.action.is_none() {
      task.action = record.action.clone();
    }

    let row = HostRow {
      host: record.host.clone(),
      status: record.status(),
      changed: record.flags.changed,
      message: record.message.clone(),
      facts: resolve(&record.host),
    };

    match row_index.get(&(t, record.host.clone())) {
      Some(&r) => {
        debug!(task = %record.task, host = %record.host, "duplicate outcome, keeping the later one");
        task.hosts[r] = row;
      }
      None => {
        task.hosts.push(row);
        row_index.insert((t, record.host.clone()), task.hosts.len() - 1);
      }
    }
  }

  let mut summary = StatusSummary::default();
  let mut hosts: Vec<HostEntry> = Vec::new();
  for task in &tasks {
    for row in &task.hosts {
      summary.record(row.status);
      if !hosts.iter().any(|h| h.host == row.host) {
        let (snapshot, source) = resolved[&row.host].clone();
        hosts.push(host_entry(&row.host, snapshot, source));
      }
    }
  }

  for host in facts.hosts() {
    if !hosts.iter().any(|h| h.host == host) {
      let (snapshot, source) = resolve_snapshot(host, facts, None);
      hosts.push(host_entry(host, snapshot, source));
    }
  }

  Report {
    summary,
    hosts,
    tasks,
  }
}

fn resolve_snapshot(
  host: &str,
  facts: &FactSet,
  gathered: Option<&serde_json::Value>,
) -> (Arc<FactSnapshot>, FactSource) {
  match (facts.get(host), gathered) {
    (Some(snapshot), _) if snapshot.is_available() => (snapshot.clone(), FactSource::Collected),
    (_, Some(tree)) => (
      Arc::new(FactSnapshot::Available {
        facts: tree.clone(),
      }),
      FactSource::Gathered,
    ),
    (Some(snapshot), None) => (snapshot.clone(), FactSource::Collected),
    (None, None) => (Arc::new(FactSnapshot::missing()), FactSource::Missing),
  }
}

fn host_entry(host: &str, facts: Arc<FactSnapshot>, fact_source: FactSource) -> HostEntry {
  HostEntry {
    host: host.to_string(),
    system_info: SystemInfo::from_snapshot(&facts),
    facts,
    fact_source,
  }
}
