//! Task outcome records.

use serde::{Deserialize, Serialize};

use crate::status::{Status, classify};

/// Raw flags reported by the engine for one task on one host.
///
/// The flags are not mutually exclusive at the source; [`classify`] resolves
/// them to a single [`Status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawFlags {
  #[serde(default)]
  pub changed: bool,
  #[serde(default)]
  pub failed: bool,
  #[serde(default)]
  pub skipped: bool,
  #[serde(default)]
  pub unreachable: bool,
}

impl RawFlags {
  /// Flags that classify to `status`, with the given changed bit.
  pub fn from_status(status: Status, changed: bool) -> Self {
    Self {
      changed,
      failed: status == Status::Failed,
      skipped: status == Status::Skipped,
      unreachable: status == Status::Unreachable,
    }
  }
}

/// Task name the engine gives its implicit fact-gathering step.
pub const GATHERING_FACTS_TASK: &str = "Gathering Facts";

/// Actions whose result carries the host's full fact tree.
const FACT_GATHERING_ACTIONS: [&str; 2] = ["gather_facts", "setup"];

/// Result of one task on one host, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcomeRecord {
  /// Task name as reported. Not unique across a run.
  pub task: String,
  /// Module/action name, when the engine reports one.
  pub action: Option<String>,
  /// Host identifier, shared with the fact snapshot.
  pub host: String,
  pub flags: RawFlags,
  /// Diagnostic text.
  pub message: Option<String>,
  /// Fact tree embedded in the result of a fact-gathering task.
  pub facts: Option<serde_json::Value>,
}

impl TaskOutcomeRecord {
  /// Create a record with no action, message or embedded facts.
  pub fn new(task: impl Into<String>, host: impl Into<String>, flags: RawFlags) -> Self {
    Self {
      task: task.into(),
      action: None,
      host: host.into(),
      flags,
      message: None,
      facts: None,
    }
  }

  /// Attach a diagnostic message.
  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }

  /// Canonical status of this record.
  pub fn status(&self) -> Status {
    classify(&self.flags)
  }

  /// Whether this is a fact-gathering step rather than some other module
  /// that happens to return `ansible_facts` (`set_fact`, `service_facts`).
  pub fn is_fact_gathering(&self) -> bool {
    self.task == GATHERING_FACTS_TASK
      || self
        .action
        .as_deref()
        .is_some_and(|action| FACT_GATHERING_ACTIONS.contains(&action))
  }
}
