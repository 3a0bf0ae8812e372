use harden_outcome::Status;
use serde::Serialize;

/// Number of report rows per status. All five keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
  #[serde(rename = "OK")]
  pub ok: usize,
  #[serde(rename = "CHANGED")]
  pub changed: usize,
  #[serde(rename = "SKIPPED")]
  pub skipped: usize,
  #[serde(rename = "UNREACHABLE")]
  pub unreachable: usize,
  #[serde(rename = "FAILED")]
  pub failed: usize,
}

impl StatusSummary {
  /// Count one row.
  pub fn record(&mut self, status: Status) {
    *self.slot(status) += 1;
  }

  pub fn get(&self, status: Status) -> usize {
    match status {
      Status::Ok => self.ok,
      Status::Changed => self.changed,
      Status::Skipped => self.skipped,
      Status::Unreachable => self.unreachable,
      Status::Failed => self.failed,
    }
  }

  pub fn total(&self) -> usize {
    Status::ALL.iter().map(|s| self.get(*s)).sum()
  }

  fn slot(&mut self, status: Status) -> &mut usize {
    match status {
      Status::Ok => &mut self.ok,
      Status::Changed => &mut self.changed,
      Status::Skipped => &mut self.skipped,
      Status::Unreachable => &mut self.unreachable,
      Status::Failed => &mut self.failed,
    }
  }
}
