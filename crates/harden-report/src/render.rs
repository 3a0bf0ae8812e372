//! Presentation documents rendered from the in-memory report.

use harden_outcome::Status;
use minijinja::Environment;
use serde::Serialize;

use crate::display::{changed_label, display_task_name};
use crate::error::ReportError;
use crate::model::{HostEntry, Report};
use crate::run::RunInfo;

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../templates/report.html");

/// Renders a presentation document from a report.
///
/// Renderers always receive the same in-memory model that was serialized to
/// JSON; they never re-read the JSON artifact.
pub trait DocumentRenderer: Send + Sync {
  /// Render the whole document.
  fn render(&self, run: &RunInfo, report: &Report) -> Result<String, ReportError>;
}

/// HTML renderer backed by an embedded minijinja template.
pub struct HtmlRenderer {
  env: Environment<'static>,
}

impl HtmlRenderer {
  /// Create a renderer using the built-in template.
  pub fn new() -> Result<Self, ReportError> {
    Self::with_template(TEMPLATE)
  }

  /// Create a renderer using a custom template source.
  ///
  /// The template sees `title`, `run`, `summary` (label/count pairs), `hosts`
  /// and `rows` (task/host/status/changed/message).
  pub fn with_template(source: &'static str) -> Result<Self, ReportError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, source)?;
    Ok(Self { env })
  }
}

#[derive(Serialize)]
struct SummaryCell {
  label: &'static str,
  count: usize,
}

#[derive(Serialize)]
struct RowView<'a> {
  task: String,
  host: &'a str,
  status: &'static str,
  changed: &'static str,
  message: Option<&'a str>,
}

#[derive(Serialize)]
struct DocumentView<'a> {
  title: &'static str,
  run: &'a RunInfo,
  summary: Vec<SummaryCell>,
  hosts: &'a [HostEntry],
  rows: Vec<RowView<'a>>,
}

impl DocumentRenderer for HtmlRenderer {
  fn render(&self, run: &RunInfo, report: &Report) -> Result<String, ReportError> {
    let view = DocumentView {
      title: "Hardening Report",
      run,
      summary: Status::ALL
        .iter()
        .map(|status| SummaryCell {
          label: status.label(),
          count: report.summary.get(*status),
        })
        .collect(),
      hosts: &report.hosts,
      rows: report
        .rows()
        .map(|(task, row)| RowView {
          task: display_task_name(&task.name),
          host: &row.host,
          status: row.status.label(),
          changed: changed_label(row.changed),
          message: row.message.as_deref(),
        })
        .collect(),
    };

    let template = self.env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(&view)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_broken_template_is_a_render_error() {
    let result = HtmlRenderer::with_template("{% for %}");
    assert!(matches!(result, Err(ReportError::Render { .. })));
  }

  #[test]
  fn test_empty_report_renders() {
    let renderer = HtmlRenderer::new().unwrap();
    let run = RunInfo::start("run-1", "/tmp/run-1");

    let html = renderer.render(&run, &Report::default()).unwrap();
    assert!(html.contains("Hardening Report"));
    assert!(html.contains("No tasks were reported."));
  }
}
