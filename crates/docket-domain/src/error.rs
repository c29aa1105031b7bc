//! Error taxonomy shared by every triage operation

use crate::TriageStatus;
use thiserror::Error;

/// Errors raised by triage and detection operations
///
/// Every failure is local and synchronous. A failed call never leaves a
/// record half-updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// Requested status is not a legal successor of the current one
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the record is in
        from: TriageStatus,
        /// Status that was requested
        to: TriageStatus,
    },

    /// Referenced checklist item does not exist on the record
    #[error("Checklist item not found: {0}")]
    ChecklistItemNotFound(String),

    /// Input rejected before any computation
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl TriageError {
    /// Shorthand for building a [`TriageError::MalformedInput`]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}
