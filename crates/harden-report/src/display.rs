//! Presentation helpers shared by the document and console renderers.

const MAX_TASK_NAME: usize = 90;

/// Task name as shown to people: without a `role : ` prefix, truncated to
/// 90 characters.
pub fn display_task_name(raw: &str) -> String {
  let name = match raw.split_once(" : ") {
    Some((_, task)) => task,
    None => raw,
  };

  if name.chars().count() > MAX_TASK_NAME {
    let head: String = name.chars().take(MAX_TASK_NAME - 3).collect();
    format!("{head}...")
  } else {
    name.to_string()
  }
}

pub fn changed_label(changed: bool) -> &'static str {
  if changed { "Yes" } else { "No" }
}
