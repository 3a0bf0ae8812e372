//! Error types for outcome parsing.

use thiserror::Error;

/// Errors that can occur while parsing an outcome document.
#[derive(Debug, Error)]
pub enum OutcomeError {
  /// The input is not a JSON document at all.
  #[error("outcome document is not valid JSON: {message}")]
  InvalidDocument { message: String },

  /// The document is JSON but an element does not have the expected shape.
  #[error("malformed outcome at {location}: {reason}")]
  Malformed { location: String, reason: String },
}

impl OutcomeError {
  /// Create a malformed-element error.
  pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Malformed {
      location: location.into(),
      reason: reason.into(),
    }
  }
}
