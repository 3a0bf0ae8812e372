//! Best-effort console summary.

use std::io::{self, Write};
use std::sync::Mutex;

use harden_outcome::Status;

use crate::display::{changed_label, display_task_name};
use crate::error::ReportError;
use crate::model::Report;

/// Capability for printing a quick human summary of a report.
///
/// The summary is a convenience; callers log failures and move on.
pub trait SummaryRenderer: Send + Sync {
  fn render(&self, report: &Report) -> Result<(), ReportError>;
}

/// A renderer that prints nothing.
///
/// Used when console output is not wanted.
#[derive(Debug, Clone, Default)]
pub struct NoopSummary;

impl SummaryRenderer for NoopSummary {
  fn render(&self, _report: &Report) -> Result<(), ReportError> {
    Ok(())
  }
}

/// Writes the (host, task, status, changed) table produced by [`format_table`].
pub struct TableSummary<W> {
  out: Mutex<W>,
}

impl<W: Write + Send> TableSummary<W> {
  pub fn new(out: W) -> Self {
    Self {
      out: Mutex::new(out),
    }
  }

  /// Take back the writer.
  pub fn into_inner(self) -> W {
    self
      .out
      .into_inner()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl TableSummary<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write + Send> SummaryRenderer for TableSummary<W> {
  fn render(&self, report: &Report) -> Result<(), ReportError> {
    let table = format_table(report);
    let mut out = self
      .out
      .lock()
      .map_err(|_| ReportError::render("console writer poisoned"))?;

    out.write_all(table.as_bytes()).map_err(console_error)?;
    out.flush().map_err(console_error)
  }
}

fn console_error(e: io::Error) -> ReportError {
  ReportError::render(format!("failed to write console summary: {e}"))
}

/// Column-aligned table of every row followed by the status totals.
pub fn format_table(report: &Report) -> String {
  const HEADERS: [&str; 4] = ["HOST", "TASK", "STATUS", "CHANGED"];

  let rows: Vec<[String; 4]> = report
    .rows()
    .map(|(task, row)| {
      [
        row.host.clone(),
        display_task_name(&task.name),
        row.status.label().to_string(),
        changed_label(row.changed).to_string(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(|h| h.chars().count());
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut table = String::new();
  push_line(&mut table, &HEADERS.map(String::from), &widths);
  for row in &rows {
    push_line(&mut table, row, &widths);
  }

  let totals: Vec<String> = Status::ALL
    .iter()
    .map(|s| format!("{}={}", s.label(), report.summary.get(*s)))
    .collect();
  table.push_str(&totals.join(" "));
  table.push('\n');
  table
}

fn push_line(table: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
  let padded: Vec<String> = cells
    .iter()
    .zip(widths)
    .map(|(cell, &width)| format!("{cell:<width$}"))
    .collect();
  table.push_str(padded.join("  ").trim_end());
  table.push('\n');
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::aggregate::aggregate;
  use harden_facts::FactSet;
  use harden_outcome::{RawFlags, TaskOutcomeRecord};

  fn sample_report() -> Report {
    aggregate(
      vec![
        TaskOutcomeRecord::new(
          "ssh : Disable root login",
          "web1",
          RawFlags {
            changed: true,
            ..RawFlags::default()
          },
        ),
        TaskOutcomeRecord::new(
          "Install auditd",
          "db-primary",
          RawFlags {
            failed: true,
            ..RawFlags::default()
          },
        ),
      ],
      &FactSet::new(),
    )
  }

  #[test]
  fn test_format_table() {
    let table = format_table(&sample_report());
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(
      lines,
      vec![
        "HOST        TASK                STATUS   CHANGED",
        "web1        Disable root login  CHANGED  Yes",
        "db-primary  Install auditd      FAILED   No",
        "OK=0 CHANGED=1 SKIPPED=0 UNREACHABLE=0 FAILED=1",
      ]
    );
  }

  #[test]
  fn test_table_summary_writes_to_writer() {
    let summary = TableSummary::new(Vec::new());
    summary.render(&sample_report()).unwrap();

    let written = String::from_utf8(summary.into_inner()).unwrap();
    assert!(written.starts_with("HOST"));
    assert!(written.ends_with("FAILED=1\n"));
  }

  #[test]
  fn test_noop_summary() {
    assert!(NoopSummary.render(&Report::default()).is_ok());
  }
}
