//! Human-oriented system summary extracted from a fact tree.

use serde::Serialize;
use serde_json::Value;

use crate::snapshot::FactSnapshot;

const NOT_AVAILABLE: &str = "N/A";
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Summary of the facts shown in the report's system information section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
  pub hostname: String,
  pub os: String,
  pub architecture: String,
  pub kernel: String,
  pub cpu: String,
  pub ram: String,
  /// Mount points larger than 1 GiB, e.g. "/ (49.09 GB)".
  pub storage: Vec<String>,
  /// Non-loopback interfaces, e.g. "eth0: 10.0.0.5 (52:54:00:12:34:56)".
  pub network: Vec<String>,
}

impl SystemInfo {
  /// Extract the summary from a snapshot.
  ///
  /// An unavailable snapshot yields "N/A" everywhere, with the reason shown
  /// in place of the hostname.
  pub fn from_snapshot(snapshot: &FactSnapshot) -> Self {
    match snapshot {
      FactSnapshot::Available { facts } => Self::from_facts(facts),
      FactSnapshot::Unavailable { reason } => Self {
        hostname: format!("ERROR: {reason}"),
        ..Self::from_facts(&Value::Null)
      },
    }
  }

  fn from_facts(facts: &Value) -> Self {
    let text = |key: &str| {
      fact(facts, key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
    };

    let os = match (
      fact(facts, "distribution").and_then(Value::as_str),
      fact(facts, "distribution_version").and_then(Value::as_str),
    ) {
      (Some(name), Some(version)) => format!("{name} {version}"),
      (Some(name), None) => name.to_string(),
      _ => NOT_AVAILABLE.to_string(),
    };

    Self {
      hostname: text("hostname"),
      os,
      architecture: text("architecture"),
      kernel: text("kernel"),
      cpu: cpu(facts),
      ram: ram(facts),
      storage: storage(facts),
      network: network(facts),
    }
  }
}

/// Look up `ansible_<key>`, falling back to the bare key.
fn fact<'a>(facts: &'a Value, key: &str) -> Option<&'a Value> {
  facts
    .get(format!("ansible_{key}"))
    .or_else(|| facts.get(key))
}

fn cpu(facts: &Value) -> String {
  // The processor list interleaves index, vendor and model name.
  let processors = fact(facts, "processor")
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .unwrap_or_default();

  let model = if processors.len() > 2 {
    processors[2].as_str()
  } else {
    processors.first().and_then(Value::as_str)
  }
  .unwrap_or("Unknown");

  let vcpus = fact(facts, "processor_vcpus")
    .and_then(Value::as_u64)
    .unwrap_or(1);

  format!("{model} ({vcpus} vCPUs)")
}

fn ram(facts: &Value) -> String {
  let total_mb = fact(facts, "memtotal_mb")
    .and_then(Value::as_f64)
    .unwrap_or(0.0);
  format!("{:.2} GB", total_mb / 1024.0)
}

fn storage(facts: &Value) -> Vec<String> {
  let Some(mounts) = fact(facts, "mounts").and_then(Value::as_array) else {
    return Vec::new();
  };

  mounts
    .iter()
    .filter_map(|m| {
      let size = m.get("size_total").and_then(Value::as_f64)?;
      let mount = m.get("mount").and_then(Value::as_str)?;
      (size > GIB).then(|| format!("{mount} ({:.2} GB)", size / GIB))
    })
    .collect()
}

fn network(facts: &Value) -> Vec<String> {
  let Some(interfaces) = fact(facts, "interfaces").and_then(Value::as_array) else {
    return Vec::new();
  };

  interfaces
    .iter()
    .filter_map(Value::as_str)
    .filter(|iface| *iface != "lo")
    .filter_map(|iface| {
      let details = fact(facts, iface)?;
      let addr = details
        .get("ipv4")
        .and_then(|v| v.get("address"))
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE);
      let mac = details
        .get("macaddress")
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE);
      Some(format!("{iface}: {addr} ({mac})"))
    })
    .collect()
}
