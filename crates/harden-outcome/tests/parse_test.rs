//! Integration tests for outcome document parsing.

use harden_outcome::{OutcomeError, Status, parse};
use serde_json::json;

#[test]
fn test_empty_task_sequence_produces_no_records() {
  let records = parse(br#"{ "tasks": [] }"#).unwrap();
  assert!(records.is_empty());

  let records = parse(br#"{ "plays": [], "stats": {} }"#).unwrap();
  assert!(records.is_empty());
}

#[test]
fn test_whitespace_only_input_is_empty() {
  let records = parse(b"  \n").unwrap();
  assert!(records.is_empty());
}

#[test]
fn test_hosts_keep_document_order() {
  let doc = json!({
    "tasks": [
      { "name": "A", "hosts": { "h2": {}, "h1": {}, "h3": {} } },
      { "name": "B", "hosts": { "h1": {} } }
    ]
  });

  let records = parse(doc.to_string().as_bytes()).unwrap();
  let pairs: Vec<(&str, &str)> = records
    .iter()
    .map(|r| (r.task.as_str(), r.host.as_str()))
    .collect();

  assert_eq!(
    pairs,
    vec![("A", "h2"), ("A", "h1"), ("A", "h3"), ("B", "h1")]
  );
}

#[test]
fn test_unknown_fields_are_ignored() {
  let doc = json!({
    "tasks": [{
      "task": { "name": "Disable root login", "id": "abc", "duration": { "start": "x" } },
      "hosts": {
        "web1": {
          "changed": true,
          "diff": [{ "before": "yes", "after": "no" }],
          "invocation": { "module_args": {} },
          "_ansible_no_log": false
        }
      }
    }]
  });

  let records = parse(doc.to_string().as_bytes()).unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].status(), Status::Changed);
}

#[test]
fn test_playbook_callback_shape_flattens_plays() {
  let doc = json!({
    "plays": [
      {
        "play": { "name": "harden" },
        "tasks": [
          {
            "task": { "name": "Gathering Facts", "action": "gather_facts" },
            "hosts": { "web1": { "ansible_facts": { "ansible_hostname": "web1" } } }
          },
          {
            "task": { "name": "ssh : Disable root login" },
            "hosts": { "web1": { "failed": true, "changed": true, "msg": "permission denied" } }
          }
        ]
      },
      {
        "play": { "name": "second" },
        "tasks": [
          { "task": { "name": "Reboot" }, "hosts": { "web1": { "unreachable": true } } }
        ]
      }
    ],
    "stats": { "web1": { "ok": 1 } }
  });

  let records = parse(doc.to_string().as_bytes()).unwrap();
  assert_eq!(records.len(), 3);

  assert_eq!(records[0].action.as_deref(), Some("gather_facts"));
  assert_eq!(
    records[0].facts.as_ref().and_then(|f| f.get("ansible_hostname")),
    Some(&json!("web1"))
  );

  assert_eq!(records[1].status(), Status::Failed);
  assert!(records[1].flags.changed);
  assert_eq!(records[1].message.as_deref(), Some("permission denied"));

  assert_eq!(records[2].task, "Reboot");
  assert_eq!(records[2].status(), Status::Unreachable);
}

#[test]
fn test_bare_array_of_groups() {
  let records = parse(br#"[{ "name": "t", "hosts": { "a": { "skipped": true } } }]"#).unwrap();
  assert_eq!(records[0].status(), Status::Skipped);
}

#[test]
fn test_invalid_json_is_rejected() {
  let err = parse(b"{ not json").unwrap_err();
  assert!(matches!(err, OutcomeError::InvalidDocument { .. }));
}

#[test]
fn test_missing_top_level_structure_is_rejected() {
  let err = parse(br#"{ "results": [] }"#).unwrap_err();
  assert!(matches!(err, OutcomeError::Malformed { .. }));

  let err = parse(b"42").unwrap_err();
  assert!(matches!(err, OutcomeError::Malformed { .. }));
}

#[test]
fn test_one_malformed_group_fails_the_whole_parse() {
  let doc = json!({
    "tasks": [
      { "name": "good", "hosts": { "h": {} } },
      { "name": "no hosts" }
    ]
  });

  let err = parse(doc.to_string().as_bytes()).unwrap_err();
  match err {
    OutcomeError::Malformed { location, reason } => {
      assert_eq!(location, "tasks[1]");
      assert!(reason.contains("no hosts"), "reason: {reason}");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_malformed_location_inside_plays() {
  let doc = json!({
    "plays": [{ "tasks": [{ "task": { "name": "x" }, "hosts": [] }] }]
  });

  let err = parse(doc.to_string().as_bytes()).unwrap_err();
  match err {
    OutcomeError::Malformed { location, .. } => assert_eq!(location, "plays[0].tasks[0]"),
    other => panic!("unexpected error: {other}"),
  }
}
