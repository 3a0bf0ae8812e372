//! Error types for report generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while emitting or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
  /// Failed to write an artifact.
  #[error("failed to write {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Failed to serialize the report.
  #[error("failed to serialize report: {0}")]
  Serialization(#[from] serde_json::Error),

  /// A presentation renderer failed.
  #[error("render failed: {message}")]
  Render { message: String },
}

impl ReportError {
  /// Create a render error.
  pub fn render(message: impl Into<String>) -> Self {
    Self::Render {
      message: message.into(),
    }
  }
}

impl From<minijinja::Error> for ReportError {
  fn from(e: minijinja::Error) -> Self {
    Self::render(e.to_string())
  }
}
