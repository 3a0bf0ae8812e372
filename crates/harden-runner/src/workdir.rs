//! Per-run working directories.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::debug;

use crate::error::RunError;

const MAX_ATTEMPTS: usize = 8;

/// A freshly created, exclusively owned run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDir {
  /// Directory name, also used as the run identifier.
  pub run_id: String,
  pub path: PathBuf,
}

/// Create a new run directory under `root`.
///
/// The name is `run-<UTC timestamp with microseconds>`. The leaf is created
/// with a non-recursive `create_dir`, so two concurrent runs can never share
/// a directory: the loser of a name collision retries with a random suffix.
pub async fn create_run_dir(root: &Path) -> Result<WorkingDir, RunError> {
  fs::create_dir_all(root)
    .await
    .map_err(|source| RunError::Setup {
      path: root.to_path_buf(),
      source,
    })?;

  let base = format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S%.6fZ"));
  let mut run_id = base.clone();
  let mut attempt = 1;

  loop {
    let path = root.join(&run_id);
    match fs::create_dir(&path).await {
      Ok(()) => return Ok(WorkingDir { run_id, path }),
      Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_ATTEMPTS => {
        debug!(path = %path.display(), attempt, "run directory exists, retrying with a suffix");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        run_id = format!("{base}-{}", &suffix[..8]);
        attempt += 1;
      }
      Err(source) => return Err(RunError::Setup { path, source }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[tokio::test]
  async fn test_creates_unique_directories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("reports");

    let first = create_run_dir(&root).await.unwrap();
    let second = create_run_dir(&root).await.unwrap();

    assert!(first.path.is_dir());
    assert!(second.path.is_dir());
    assert_ne!(first.path, second.path);
    assert!(first.run_id.starts_with("run-"));
    assert_eq!(first.path.file_name().unwrap(), first.run_id.as_str());
  }

  #[tokio::test]
  async fn test_concurrent_runs_never_share_a_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();

    let handles: Vec<_> = (0..16)
      .map(|_| {
        let root = root.clone();
        tokio::spawn(async move { create_run_dir(&root).await.unwrap() })
      })
      .collect();

    let mut paths = Vec::new();
    for handle in handles {
      paths.push(handle.await.unwrap().path);
    }
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 16);
  }

  #[tokio::test]
  async fn test_unusable_root_is_a_setup_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not-a-dir");
    std::fs::write(&file, b"").unwrap();

    let result = create_run_dir(&file).await;
    assert!(matches!(result, Err(RunError::Setup { .. })));
  }
}
