use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactNames;
use crate::engine::EngineConfig;

/// Top-level configuration for a run coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
  /// Directory under which each run creates its own working directory.
  pub report_root: PathBuf,

  #[serde(default)]
  pub engine: EngineConfig,

  #[serde(default)]
  pub artifacts: ArtifactNames,
}

impl RunnerConfig {
  /// Create a config with default engine settings and artifact names.
  pub fn new(report_root: impl Into<PathBuf>) -> Self {
    Self {
      report_root: report_root.into(),
      engine: EngineConfig::default(),
      artifacts: ArtifactNames::default(),
    }
  }
}

/// On-disk form of [`RunnerConfig`]. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
  pub report_root: Option<PathBuf>,
  pub engine: EngineConfig,
  pub artifacts: ArtifactNames,
}

impl ConfigFile {
  /// Parse a JSON config document.
  pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(source)
  }

  /// Complete the config with the report root chosen by the caller.
  pub fn into_config(self, report_root: impl Into<PathBuf>) -> RunnerConfig {
    RunnerConfig {
      report_root: report_root.into(),
      engine: self.engine,
      artifacts: self.artifacts,
    }
  }
}
