//! Harden Outcome
//!
//! This crate turns the task-outcome document emitted by the automation
//! engine into an ordered sequence of [`TaskOutcomeRecord`]s, and maps each
//! record's raw engine flags onto one canonical [`Status`].
//!
//! The parser is strict about structure and lenient about content: unknown
//! fields are ignored, but a task group or host entry that does not have the
//! expected shape fails the whole parse with [`OutcomeError::Malformed`].
//! Nothing is dropped silently.

mod error;
mod parser;
mod record;
mod status;

pub use error::OutcomeError;
pub use parser::parse;
pub use record::{GATHERING_FACTS_TASK, RawFlags, TaskOutcomeRecord};
pub use status::{Status, classify};
