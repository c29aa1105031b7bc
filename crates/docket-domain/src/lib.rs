//! Docket Domain Layer
//!
//! Core value objects for demand triage. Everything in this crate is plain,
//! serializable data plus the guarded state machine that mutates a
//! [`TriageRecord`]. Storage, transport and catalog lookups belong to callers.
//!
//! ## Key Concepts
//!
//! - **Demand**: an incoming work item awaiting classification
//! - **Triage record**: status, ratings and checklist for one demand
//! - **Rating**: catalog-driven ordinal level plus numeric weight
//! - **Signals**: similarity, readiness and duplicate-marker observations
//! - **Suggestions**: actionable hints derived from the signals

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod demand;
pub mod error;
pub mod rating;
pub mod signal;
pub mod status;
pub mod suggestion;
pub mod triage;

// Re-exports for convenience
pub use demand::Demand;
pub use error::TriageError;
pub use rating::{PriorityFormula, Rating, RatingLevel};
pub use signal::{
    DuplicateMarker, ReadinessKind, ReadinessSignal, Severity, SimilarityBreakdown,
    SimilaritySignal,
};
pub use status::TriageStatus;
pub use suggestion::{RelatedReference, Suggestion, SuggestionKind, SuggestionPriority};
pub use triage::{default_checklist, ChecklistItem, ChecklistProgress, TriageId, TriageRecord};
