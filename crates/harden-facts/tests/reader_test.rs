//! Integration tests for loading fact directories.

use harden_facts::{FactSnapshot, FsFactReader};
use serde_json::json;

#[tokio::test]
async fn test_missing_directory_yields_empty_set() {
  let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
  let reader = FsFactReader::new(temp_dir.path().join("does-not-exist"));

  let facts = reader.read().await.unwrap();
  assert!(facts.is_empty());
}

#[tokio::test]
async fn test_empty_directory_yields_empty_set() {
  let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
  let facts = FsFactReader::new(temp_dir.path()).read().await.unwrap();
  assert!(facts.is_empty());
}

#[tokio::test]
async fn test_reads_one_snapshot_per_host() {
  let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
  let root = temp_dir.path();

  std::fs::write(
    root.join("web1"),
    json!({ "ansible_facts": { "ansible_hostname": "web1" } }).to_string(),
  )
  .unwrap();
  std::fs::write(
    root.join("web2.json"),
    json!({ "ansible_facts": { "ansible_hostname": "web2" } }).to_string(),
  )
  .unwrap();
  std::fs::write(
    root.join("db1"),
    json!({ "unreachable": true, "msg": "no route to host" }).to_string(),
  )
  .unwrap();
  std::fs::write(root.join("broken"), "{ truncated").unwrap();
  std::fs::write(root.join(".DS_Store"), "junk").unwrap();
  std::fs::create_dir(root.join("nested")).unwrap();

  let facts = FsFactReader::new(root).read().await.unwrap();

  let hosts: Vec<&str> = facts.hosts().collect();
  assert_eq!(hosts, vec!["broken", "db1", "web1", "web2"]);

  assert_eq!(
    facts.get("web2").unwrap().facts(),
    Some(&json!({ "ansible_hostname": "web2" }))
  );
  assert_eq!(
    **facts.get("db1").unwrap(),
    FactSnapshot::Unavailable {
      reason: "UNREACHABLE: no route to host".to_string()
    }
  );
  assert!(!facts.get("broken").unwrap().is_available());
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinks_are_followed() {
  let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
  let root = temp_dir.path().join("facts");
  let elsewhere = temp_dir.path().join("elsewhere");
  std::fs::create_dir(&root).unwrap();
  std::fs::create_dir(&elsewhere).unwrap();

  std::fs::write(
    elsewhere.join("web1"),
    json!({ "ansible_facts": { "ansible_hostname": "web1" } }).to_string(),
  )
  .unwrap();
  std::os::unix::fs::symlink(elsewhere.join("web1"), root.join("web1")).unwrap();
  std::os::unix::fs::symlink(&elsewhere, root.join("linked-dir")).unwrap();
  std::os::unix::fs::symlink(elsewhere.join("gone"), root.join("dangling")).unwrap();

  let facts = FsFactReader::new(&root).read().await.unwrap();

  let hosts: Vec<&str> = facts.hosts().collect();
  assert_eq!(hosts, vec!["web1"]);
  assert!(facts.get("web1").unwrap().is_available());
}
