use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::FactError;
use crate::snapshot::{FactSet, FactSnapshot};

/// Filesystem-based fact reader.
///
/// Every regular file directly under `root` is one host's fact document.
/// The host identifier is the file name with any `.json` extension removed.
pub struct FsFactReader {
  root: PathBuf,
}

impl FsFactReader {
  /// Create a reader for the given fact directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Get the fact directory.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Derive the host identifier from a fact file name.
  fn host_from_file_name(file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') {
      return None;
    }
    let host = file_name.strip_suffix(".json").unwrap_or(file_name);
    (!host.is_empty()).then_some(host)
  }

  /// Load every host's snapshot.
  ///
  /// A missing directory yields an empty set. Unreadable or unparseable
  /// documents are logged and recorded as unavailable for that host.
  pub async fn read(&self) -> Result<FactSet, FactError> {
    let mut facts = FactSet::new();

    let mut entries = match fs::read_dir(&self.root).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %self.root.display(), "no fact directory, continuing without facts");
        return Ok(facts);
      }
      Err(source) => {
        return Err(FactError::Io {
          path: self.root.clone(),
          source,
        });
      }
    };

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    loop {
      let entry = match entries.next_entry().await {
        Ok(Some(entry)) => entry,
        Ok(None) => break,
        Err(source) => {
          return Err(FactError::Io {
            path: self.root.clone(),
            source,
          });
        }
      };

      let path = entry.path();
      if !is_regular_file(&entry).await {
        continue;
      }

      let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => continue,
      };

      if let Some(host) = Self::host_from_file_name(file_name) {
        files.push((host.to_string(), path.clone()));
      }
    }

    files.sort();

    for (host, path) in files {
      let snapshot = match fs::read(&path).await {
        Ok(content) => parse_fact_document(&content),
        Err(e) => {
          warn!(host = %host, path = %path.display(), error = %e, "failed to read fact document");
          FactSnapshot::Unavailable {
            reason: format!("unreadable fact document: {e}"),
          }
        }
      };

      if let FactSnapshot::Unavailable { reason } = &snapshot {
        warn!(host = %host, reason = %reason, "facts unavailable for host");
      }
      facts.insert(host, snapshot);
    }

    debug!(hosts = facts.len(), "loaded fact snapshots");
    Ok(facts)
  }
}

/// Whether a directory entry is a file, following symlinks.
async fn is_regular_file(entry: &fs::DirEntry) -> bool {
  match entry.file_type().await {
    Ok(file_type) if file_type.is_symlink() => fs::metadata(entry.path())
      .await
      .map(|metadata| metadata.is_file())
      .unwrap_or(false),
    Ok(file_type) => file_type.is_file(),
    Err(e) => {
      warn!(path = %entry.path().display(), error = %e, "skipping fact directory entry");
      false
    }
  }
}

/// Interpret one host's fact document.
///
/// - `{"ansible_facts": {...}}` is an available snapshot of the inner tree.
/// - `{"unreachable": true, "msg": ..}` and `{"failed": true, "msg": ..}` are
///   unavailable, with the engine's message as the reason.
/// - Any other object is taken as the fact tree itself.
pub fn parse_fact_document(content: &[u8]) -> FactSnapshot {
  let document: Value = match serde_json::from_slice(content) {
    Ok(document) => document,
    Err(e) => {
      return FactSnapshot::Unavailable {
        reason: format!("invalid fact document: {e}"),
      };
    }
  };

  let Value::Object(mut root) = document else {
    return FactSnapshot::Unavailable {
      reason: "fact document is not an object".to_string(),
    };
  };

  if let Some(facts) = root.remove("ansible_facts") {
    return FactSnapshot::Available { facts };
  }

  let message = || {
    root
      .get("msg")
      .and_then(Value::as_str)
      .unwrap_or("Unknown Error")
      .to_string()
  };

  if is_set(&root, "unreachable") {
    return FactSnapshot::Unavailable {
      reason: format!("UNREACHABLE: {}", message()),
    };
  }
  if is_set(&root, "failed") {
    return FactSnapshot::Unavailable {
      reason: format!("FAILED: {}", message()),
    };
  }

  FactSnapshot::Available {
    facts: Value::Object(root),
  }
}

fn is_set(root: &serde_json::Map<String, Value>, key: &str) -> bool {
  root.get(key).and_then(Value::as_bool).unwrap_or(false)
}
