//! Writing report artifacts to a run directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use harden_config::ArtifactNames;
use serde::Serialize;
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::ReportError;
use crate::model::Report;
use crate::render::DocumentRenderer;
use crate::run::RunInfo;

/// Paths of the artifacts written by [`ReportEmitter::emit`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedArtifacts {
  /// Unified structured report. Always present after a successful emit.
  pub json_path: PathBuf,
  /// Rendered document, absent when rendering failed.
  pub document_path: Option<PathBuf>,
  /// Why the document is missing.
  pub render_error: Option<String>,
}

/// Layout of the unified JSON artifact.
#[derive(Serialize)]
struct UnifiedReport<'a> {
  run: &'a RunInfo,
  #[serde(flatten)]
  report: &'a Report,
}

/// Serializes a report and drives the document renderer.
pub struct ReportEmitter {
  json_name: String,
  document_name: String,
  renderer: Arc<dyn DocumentRenderer>,
}

impl ReportEmitter {
  pub fn new(names: &ArtifactNames, renderer: Arc<dyn DocumentRenderer>) -> Self {
    Self {
      json_name: names.report_json.clone(),
      document_name: names.report_document.clone(),
      renderer,
    }
  }

  /// Write the JSON artifact, then render the document.
  ///
  /// Only a failure to produce the JSON artifact is an error. A render or
  /// document write failure is logged and reported in the result; the JSON
  /// artifact stays in place and any previous document at the destination is
  /// removed.
  pub async fn emit(
    &self,
    run: &RunInfo,
    report: &Report,
    dest: &Path,
  ) -> Result<EmittedArtifacts, ReportError> {
    fs::create_dir_all(dest)
      .await
      .map_err(|source| ReportError::Io {
        path: dest.to_path_buf(),
        source,
      })?;

    let json_path = dest.join(&self.json_name);
    let json = serde_json::to_vec_pretty(&UnifiedReport { run, report })?;
    fs::write(&json_path, json)
      .await
      .map_err(|source| ReportError::Io {
        path: json_path.clone(),
        source,
      })?;
    info!(path = %json_path.display(), "unified JSON report written");

    let document_path = dest.join(&self.document_name);
    let rendered = match self.renderer.render(run, report) {
      Ok(document) => fs::write(&document_path, document)
        .await
        .map_err(|source| ReportError::Io {
          path: document_path.clone(),
          source,
        }),
      Err(e) => Err(e),
    };

    match rendered {
      Ok(()) => {
        info!(path = %document_path.display(), "report document written");
        Ok(EmittedArtifacts {
          json_path,
          document_path: Some(document_path),
          render_error: None,
        })
      }
      Err(e) => {
        error!(error = %e, "report document could not be produced");
        remove_stale(&document_path).await;
        Ok(EmittedArtifacts {
          json_path,
          document_path: None,
          render_error: Some(e.to_string()),
        })
      }
    }
  }
}

/// A document left by an earlier emit, or half-written by this one, must not
/// pass for a rendering of the current report.
async fn remove_stale(path: &Path) {
  match fs::remove_file(path).await {
    Ok(()) => info!(path = %path.display(), "stale report document removed"),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
    Err(e) => warn!(path = %path.display(), error = %e, "stale report document could not be removed"),
  }
}
