//! Outcome document parser.
//!
//! Three document shapes are accepted:
//!
//! ```text
//! {"tasks": [group, ...]}
//! {"plays": [{"tasks": [group, ...]}, ...], "stats": {...}}   // engine JSON callback
//! [group, ...]
//! ```
//!
//! A group is either `{"task": {"name": ..}, "hosts": {..}}` or the flat
//! `{"name": .., "hosts": {..}}`. Host mappings are read in document order.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::OutcomeError;
use crate::record::{RawFlags, TaskOutcomeRecord};

/// Parse an outcome document into records, in stream order.
///
/// Whitespace-only input is treated as an empty group sequence.
pub fn parse(raw: &[u8]) -> Result<Vec<TaskOutcomeRecord>, OutcomeError> {
  if raw.iter().all(u8::is_ascii_whitespace) {
    return Ok(Vec::new());
  }

  let document: Value =
    serde_json::from_slice(raw).map_err(|e| OutcomeError::InvalidDocument {
      message: e.to_string(),
    })?;

  let mut records = Vec::new();
  for (location, group) in task_groups(&document)? {
    match RawGroup::classify(group) {
      RawGroup::WellFormed(group) => group.push_records(&location, &mut records)?,
      RawGroup::Malformed(reason) => return Err(OutcomeError::malformed(location, reason)),
    }
  }

  debug!(records = records.len(), "parsed outcome document");
  Ok(records)
}

/// Locate the task groups in document order, tagged with their location.
fn task_groups(document: &Value) -> Result<Vec<(String, &Value)>, OutcomeError> {
  match document {
    Value::Array(groups) => Ok(located("", groups)),
    Value::Object(root) => {
      if let Some(plays) = root.get("plays") {
        let plays = plays
          .as_array()
          .ok_or_else(|| OutcomeError::malformed("plays", "expected an array of plays"))?;

        let mut groups = Vec::new();
        for (index, play) in plays.iter().enumerate() {
          let prefix = format!("plays[{index}].");
          let tasks = play
            .get("tasks")
            .and_then(Value::as_array)
            .ok_or_else(|| {
              OutcomeError::malformed(format!("plays[{index}]"), "expected a `tasks` array")
            })?;
          groups.extend(located(&prefix, tasks));
        }
        Ok(groups)
      } else if let Some(tasks) = root.get("tasks") {
        let tasks = tasks
          .as_array()
          .ok_or_else(|| OutcomeError::malformed("tasks", "expected an array of task groups"))?;
        Ok(located("", tasks))
      } else {
        Err(OutcomeError::malformed(
          "$",
          "expected a `tasks` or `plays` array at the top level",
        ))
      }
    }
    _ => Err(OutcomeError::malformed(
      "$",
      "expected an object or an array of task groups",
    )),
  }
}

fn located<'a>(prefix: &str, groups: &'a [Value]) -> Vec<(String, &'a Value)> {
  groups
    .iter()
    .enumerate()
    .map(|(index, group)| (format!("{prefix}tasks[{index}]"), group))
    .collect()
}

/// A task group as found in the document, before any record is produced.
enum RawGroup<'a> {
  WellFormed(TaskGroup<'a>),
  Malformed(String),
}

struct TaskGroup<'a> {
  name: String,
  action: Option<String>,
  hosts: &'a Map<String, Value>,
}

impl<'a> RawGroup<'a> {
  fn classify(value: &'a Value) -> Self {
    let Some(group) = value.as_object() else {
      return RawGroup::Malformed("expected a task group object".to_string());
    };

    // Nested descriptor first, flat form as fallback.
    let descriptor = match group.get("task") {
      Some(Value::Object(task)) => task,
      Some(_) => return RawGroup::Malformed("`task` must be an object".to_string()),
      None => group,
    };

    let name = match descriptor.get("name") {
      Some(Value::String(name)) => name.clone(),
      Some(_) => return RawGroup::Malformed("task name must be a string".to_string()),
      None => return RawGroup::Malformed("missing task name".to_string()),
    };

    let action = descriptor
      .get("action")
      .and_then(Value::as_str)
      .map(str::to_string);

    match group.get("hosts") {
      Some(Value::Object(hosts)) => RawGroup::WellFormed(TaskGroup {
        name,
        action,
        hosts,
      }),
      Some(_) => RawGroup::Malformed(format!("hosts of task '{name}' must be an object")),
      None => RawGroup::Malformed(format!("missing hosts mapping for task '{name}'")),
    }
  }
}

impl TaskGroup<'_> {
  fn push_records(
    &self,
    location: &str,
    records: &mut Vec<TaskOutcomeRecord>,
  ) -> Result<(), OutcomeError> {
    for (host, entry) in self.hosts {
      let entry = HostEntry::deserialize(entry)
        .map_err(|e| OutcomeError::malformed(format!("{location}.hosts.{host}"), e.to_string()))?;

      records.push(TaskOutcomeRecord {
        task: self.name.clone(),
        action: self
          .action
          .clone()
          .or_else(|| entry.action.as_ref().and_then(Value::as_str).map(str::to_string)),
        host: host.clone(),
        flags: RawFlags {
          changed: entry.changed,
          failed: entry.failed,
          skipped: entry.skipped,
          unreachable: entry.unreachable,
        },
        message: entry.msg.and_then(message_text),
        facts: entry.ansible_facts,
      });
    }
    Ok(())
  }
}

/// Fields read from a host entry. Everything else is ignored.
#[derive(Deserialize)]
struct HostEntry {
  #[serde(default)]
  changed: bool,
  #[serde(default)]
  failed: bool,
  #[serde(default)]
  skipped: bool,
  #[serde(default)]
  unreachable: bool,
  #[serde(default)]
  action: Option<Value>,
  #[serde(default)]
  msg: Option<Value>,
  #[serde(default)]
  ansible_facts: Option<Value>,
}

fn message_text(msg: Value) -> Option<String> {
  match msg {
    Value::Null => None,
    Value::String(text) => Some(text),
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn parse_value(value: Value) -> Result<Vec<TaskOutcomeRecord>, OutcomeError> {
    parse(value.to_string().as_bytes())
  }

  #[test]
  fn test_message_text() {
    assert_eq!(message_text(Value::Null), None);
    assert_eq!(message_text(json!("boom")), Some("boom".to_string()));
    assert_eq!(message_text(json!(["a", "b"])), Some(r#"["a","b"]"#.to_string()));
  }

  #[test]
  fn test_flat_and_nested_descriptors() {
    let records = parse_value(json!({
      "tasks": [
        { "name": "flat", "hosts": { "h": {} } },
        { "task": { "name": "nested", "action": "lineinfile" }, "hosts": { "h": {} } }
      ]
    }))
    .unwrap();

    assert_eq!(records[0].task, "flat");
    assert_eq!(records[0].action, None);
    assert_eq!(records[1].task, "nested");
    assert_eq!(records[1].action.as_deref(), Some("lineinfile"));
  }

  #[test]
  fn test_host_level_action_fills_in() {
    let records = parse_value(json!({
      "tasks": [
        { "task": { "name": "Gathering Facts" }, "hosts": { "h": { "action": "gather_facts" } } },
        { "task": { "name": "t", "action": "copy" }, "hosts": { "h": { "action": "template" } } }
      ]
    }))
    .unwrap();

    assert_eq!(records[0].action.as_deref(), Some("gather_facts"));
    assert_eq!(records[1].action.as_deref(), Some("copy"));
  }

  #[test]
  fn test_non_boolean_flag_is_malformed() {
    let err = parse_value(json!({
      "tasks": [{ "name": "t", "hosts": { "web1": { "changed": "yes" } } }]
    }))
    .unwrap_err();

    match err {
      OutcomeError::Malformed { location, .. } => assert_eq!(location, "tasks[0].hosts.web1"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_task_descriptor_must_be_object() {
    let err = parse_value(json!([{ "task": "oops", "hosts": {} }])).unwrap_err();
    assert!(matches!(err, OutcomeError::Malformed { .. }));
  }
}
