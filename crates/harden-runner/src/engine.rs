//! The execution engine capability.

use std::path::Path;

use async_trait::async_trait;

use crate::error::EngineError;

/// Everything captured from one playbook run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybookOutput {
  /// The outcome document, exactly as written by the engine.
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
  /// `None` when the process was terminated by a signal.
  pub exit_code: Option<i32>,
  /// Whether the process terminated normally.
  pub success: bool,
}

impl PlaybookOutput {
  /// True when stdout holds anything besides whitespace.
  pub fn has_output(&self) -> bool {
    !self.stdout.trim_ascii().is_empty()
  }
}

/// The external automation engine, seen only through its output contracts.
///
/// Implementations run the two remote phases of a run. They never interpret
/// what they capture; parsing belongs to the caller.
#[async_trait]
pub trait Engine: Send + Sync {
  /// Collect facts for every host in the inventory, writing one document per
  /// host into `dest`.
  async fn collect_facts(&self, inventory: &Path, dest: &Path) -> Result<(), EngineError>;

  /// Run the playbook against the inventory and capture its output.
  ///
  /// A process that starts but exits abnormally is still `Ok`; only a
  /// failure to start it at all is an error.
  async fn run_playbook(
    &self,
    playbook: &Path,
    inventory: &Path,
  ) -> Result<PlaybookOutput, EngineError>;
}
