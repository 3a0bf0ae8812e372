//! Harden Report
//!
//! This crate merges parsed task outcomes with host fact snapshots into one
//! [`Report`], and turns that report into durable artifacts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────┐
//! │ Vec<TaskOutcomeRecord>   │   │   FactSet    │
//! └────────────┬─────────────┘   └──────┬───────┘
//!              └──────────┬─────────────┘
//!                         ▼
//!                aggregate() → Report
//!                         │
//!          ┌──────────────┼──────────────────┐
//!          ▼              ▼                  ▼
//!   final_report.json  DocumentRenderer  SummaryRenderer
//!   (source of truth)  (report.html)     (console table)
//! ```
//!
//! The JSON artifact is written first and is never removed; the rendered
//! document and the console table are views over the same in-memory model.

mod aggregate;
mod console;
mod display;
mod emitter;
mod error;
mod model;
mod render;
mod run;
mod summary;

pub use aggregate::aggregate;
pub use console::{NoopSummary, SummaryRenderer, TableSummary, format_table};
pub use display::{changed_label, display_task_name};
pub use emitter::{EmittedArtifacts, ReportEmitter};
pub use error::ReportError;
pub use model::{FactSource, HostEntry, HostRow, Report, TaskEntry};
pub use render::{DocumentRenderer, HtmlRenderer};
pub use run::{RunInfo, RunOutcome, RunWarning};
pub use summary::StatusSummary;
