//! Engine implementation that shells out to the Ansible command line tools.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use harden_config::EngineConfig;
use tokio::process::Command;
use tracing::{debug, info};

use crate::engine::{Engine, PlaybookOutput};
use crate::error::EngineError;

/// Callback plugin that makes `ansible-playbook` print one JSON document.
const STDOUT_CALLBACK: (&str, &str) = ("ANSIBLE_STDOUT_CALLBACK", "json");

/// Runs `ansible` and `ansible-playbook` as subprocesses.
pub struct CommandEngine {
  config: EngineConfig,
}

impl CommandEngine {
  pub fn new(config: EngineConfig) -> Self {
    Self { config }
  }

  fn command(&self, program: &str) -> Command {
    let mut command = Command::new(program);
    command
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true);
    command
  }
}

#[async_trait]
impl Engine for CommandEngine {
  async fn collect_facts(&self, inventory: &Path, dest: &Path) -> Result<(), EngineError> {
    let program = &self.config.ansible;
    let mut command = self.command(program);
    command
      .arg("all")
      .arg("-i")
      .arg(inventory)
      .args(["-m", "setup", "--tree"])
      .arg(dest)
      .envs(&self.config.env);

    info!(command = %program, inventory = %inventory.display(), "collecting facts");
    let output = command
      .output()
      .await
      .map_err(|source| EngineError::Spawn {
        command: program.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(EngineError::Failed {
        command: program.clone(),
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    debug!(dest = %dest.display(), "fact collection finished");
    Ok(())
  }

  async fn run_playbook(
    &self,
    playbook: &Path,
    inventory: &Path,
  ) -> Result<PlaybookOutput, EngineError> {
    let program = &self.config.ansible_playbook;
    let mut command = self.command(program);
    command
      .arg("-i")
      .arg(inventory)
      .arg(playbook)
      .args(&self.config.playbook_args)
      .env(STDOUT_CALLBACK.0, STDOUT_CALLBACK.1)
      .envs(&self.config.env);

    info!(command = %program, playbook = %playbook.display(), "running playbook");
    let output = command
      .output()
      .await
      .map_err(|source| EngineError::Spawn {
        command: program.clone(),
        source,
      })?;

    debug!(
      exit_code = ?output.status.code(),
      stdout_bytes = output.stdout.len(),
      stderr_bytes = output.stderr.len(),
      "playbook finished"
    );

    Ok(PlaybookOutput {
      stdout: output.stdout,
      stderr: output.stderr,
      exit_code: output.status.code(),
      success: output.status.success(),
    })
  }
}
