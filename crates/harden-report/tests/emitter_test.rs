//! Integration tests for artifact emission.

use std::sync::Arc;

use harden_config::ArtifactNames;
use harden_facts::FactSet;
use harden_outcome::{RawFlags, TaskOutcomeRecord};
use harden_report::{
  DocumentRenderer, HtmlRenderer, Report, ReportEmitter, ReportError, RunInfo, RunWarning,
  aggregate,
};
use tempfile::TempDir;

struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
  fn render(&self, _run: &RunInfo, _report: &Report) -> Result<String, ReportError> {
    Err(ReportError::render("template exploded"))
  }
}

fn sample_report() -> Report {
  aggregate(
    vec![TaskOutcomeRecord::new(
      "ssh : Disable root login",
      "web1",
      RawFlags {
        changed: true,
        ..RawFlags::default()
      },
    )],
    &FactSet::new(),
  )
}

#[tokio::test]
async fn test_emit_writes_json_and_document() {
  let temp = TempDir::new().unwrap();
  let emitter = ReportEmitter::new(
    &ArtifactNames::default(),
    Arc::new(HtmlRenderer::new().unwrap()),
  );

  let mut run = RunInfo::start("run-1", temp.path());
  run.warn(RunWarning::FactCollection {
    message: "inventory unreachable".to_string(),
  });
  run.finish();

  let artifacts = emitter
    .emit(&run, &sample_report(), temp.path())
    .await
    .unwrap();

  assert_eq!(artifacts.json_path, temp.path().join("final_report.json"));
  assert_eq!(
    artifacts.document_path,
    Some(temp.path().join("report.html"))
  );
  assert!(artifacts.render_error.is_none());

  let json: serde_json::Value =
    serde_json::from_slice(&std::fs::read(&artifacts.json_path).unwrap()).unwrap();
  let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
  assert_eq!(keys, vec!["run", "summary", "hosts", "tasks"]);
  assert_eq!(json["run"]["run_id"], "run-1");
  assert_eq!(json["run"]["outcome"], "success");
  assert_eq!(json["run"]["warnings"][0]["kind"], "fact_collection");
  assert_eq!(json["summary"]["CHANGED"], 1);
  assert_eq!(json["tasks"][0]["name"], "ssh : Disable root login");
  assert_eq!(json["tasks"][0]["hosts"][0]["status"], "CHANGED");

  let html = std::fs::read_to_string(temp.path().join("report.html")).unwrap();
  assert!(html.contains("Disable root login"));
  assert!(!html.contains("ssh : Disable root login"));
  assert!(html.contains("inventory unreachable"));
}

#[tokio::test]
async fn test_render_failure_keeps_json() {
  let temp = TempDir::new().unwrap();
  let emitter = ReportEmitter::new(&ArtifactNames::default(), Arc::new(FailingRenderer));
  let run = RunInfo::start("run-2", temp.path());

  let artifacts = emitter
    .emit(&run, &sample_report(), temp.path())
    .await
    .unwrap();

  assert!(artifacts.json_path.exists());
  assert!(artifacts.document_path.is_none());
  assert!(
    artifacts
      .render_error
      .as_deref()
      .unwrap()
      .contains("template exploded")
  );
  assert!(!temp.path().join("report.html").exists());
}

#[tokio::test]
async fn test_render_failure_removes_previous_document() {
  let temp = TempDir::new().unwrap();
  let stale = temp.path().join("report.html");
  std::fs::write(&stale, "<html>an earlier report</html>").unwrap();

  let emitter = ReportEmitter::new(&ArtifactNames::default(), Arc::new(FailingRenderer));
  let run = RunInfo::start("run-2b", temp.path());
  let artifacts = emitter
    .emit(&run, &sample_report(), temp.path())
    .await
    .unwrap();

  assert!(artifacts.render_error.is_some());
  assert!(artifacts.document_path.is_none());
  assert!(artifacts.json_path.exists());
  assert!(!stale.exists());
}

#[tokio::test]
async fn test_emit_creates_destination() {
  let temp = TempDir::new().unwrap();
  let dest = temp.path().join("nested").join("run-3");
  let names = ArtifactNames {
    report_json: "out.json".to_string(),
    report_document: "out.html".to_string(),
    ..ArtifactNames::default()
  };
  let emitter = ReportEmitter::new(&names, Arc::new(HtmlRenderer::new().unwrap()));
  let run = RunInfo::start("run-3", &dest);

  let artifacts = emitter.emit(&run, &Report::default(), &dest).await.unwrap();

  assert_eq!(artifacts.json_path, dest.join("out.json"));
  assert!(dest.join("out.html").exists());
}
