use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading fact snapshots.
///
/// Problems with individual documents never surface here; they degrade to an
/// unavailable snapshot for that host.
#[derive(Debug, Error)]
pub enum FactError {
  /// The fact directory exists but could not be listed.
  #[error("failed to read fact directory {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
