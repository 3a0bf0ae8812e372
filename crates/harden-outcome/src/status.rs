//! Canonical task status and the classifier that derives it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::RawFlags;

/// Canonical status of one task on one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  Ok,
  Changed,
  Skipped,
  Unreachable,
  Failed,
}

impl Status {
  /// Every status, in summary order.
  pub const ALL: [Status; 5] = [
    Status::Ok,
    Status::Changed,
    Status::Skipped,
    Status::Unreachable,
    Status::Failed,
  ];

  /// Upper-case label used in reports.
  pub fn label(self) -> &'static str {
    match self {
      Status::Ok => "OK",
      Status::Changed => "CHANGED",
      Status::Skipped => "SKIPPED",
      Status::Unreachable => "UNREACHABLE",
      Status::Failed => "FAILED",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Resolve raw engine flags to exactly one status.
///
/// First match wins: failed, skipped, unreachable, changed, otherwise ok.
/// A failure is never masked by a simultaneous change.
pub fn classify(flags: &RawFlags) -> Status {
  if flags.failed {
    Status::Failed
  } else if flags.skipped {
    Status::Skipped
  } else if flags.unreachable {
    Status::Unreachable
  } else if flags.changed {
    Status::Changed
  } else {
    Status::Ok
  }
}
