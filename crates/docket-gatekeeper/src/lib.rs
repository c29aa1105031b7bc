//! Docket Gatekeeper
//!
//! Decides whether an incoming demand is ready to progress, how urgent it is,
//! and whether it repeats something already submitted.
//!
//! The Gatekeeper provides:
//! - Text similarity scoring (edit distance, bigrams, word overlap)
//! - Duplicate ranking over a candidate pool, and duplicate-marker detection
//! - Readiness signals for description detail and evidence
//! - Triage state transitions, priority and suggestions
//!
//! Every operation is synchronous and pure. Catalog metadata (weights and
//! thresholds) is passed on each call; nothing is cached between calls.
//!
//! # Examples
//!
//! ```
//! use docket_domain::{Demand, TriageStatus};
//! use docket_gatekeeper::{self as gatekeeper, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let target = Demand::new("d-2", "Monthly report export error").with_type("bug");
//! let pool = vec![Demand::new("d-1", "Error exporting monthly report").with_type("bug")];
//!
//! let ranked = gatekeeper::rank_duplicates(&target, &pool, &config.duplicates.weights).unwrap();
//! assert_eq!(ranked[0].candidate_id, "d-1");
//!
//! let record = gatekeeper::create_triage_record("d-2").unwrap();
//! let record = gatekeeper::transition_triage(&record, TriageStatus::Archived, "user-1").unwrap();
//! assert_eq!(record.triaged_by.as_deref(), Some("user-1"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod duplicates;
mod error;
pub mod readiness;
pub mod similarity;
pub mod suggestions;

pub use config::{
    DuplicateConfig, DuplicateWeights, EngineConfig, LevelWeights, RatingCatalog,
    ReadinessThresholds,
};
pub use error::GatekeeperError;

use docket_domain::{
    Demand, DuplicateMarker, PriorityFormula, ReadinessSignal, RelatedReference,
    SimilaritySignal, Suggestion, TriageError, TriageRecord, TriageStatus,
};
use std::collections::BTreeSet;

/// Similarity of two free-text strings in [0, 100]
pub fn score_text(a: &str, b: &str) -> u8 {
    similarity::score(a, b)
}

/// Rank `pool` against `target`, most similar first
pub fn rank_duplicates(
    target: &Demand,
    pool: &[Demand],
    weights: &DuplicateWeights,
) -> Result<Vec<SimilaritySignal>, TriageError> {
    duplicates::rank_candidates(target, pool, weights)
}

/// Duplicate markers found in a single demand's text
pub fn detect_duplicate_markers(demand: &Demand) -> Result<BTreeSet<DuplicateMarker>, TriageError> {
    duplicates::detect_markers(demand)
}

/// Readiness signals for a description and its evidence
pub fn analyze_readiness(
    description: Option<&str>,
    evidence_count: u32,
    require_evidence: bool,
    min_words: usize,
    min_chars: usize,
) -> Vec<ReadinessSignal> {
    readiness::evaluate(description, evidence_count, require_evidence, min_words, min_chars)
}

/// New pending triage record with the default checklist
pub fn create_triage_record(demand_id: &str) -> Result<TriageRecord, TriageError> {
    TriageRecord::new(demand_id)
}

/// Move a record to `status` on behalf of `user_id`
pub fn transition_triage(
    record: &TriageRecord,
    status: TriageStatus,
    user_id: &str,
) -> Result<TriageRecord, TriageError> {
    record.transition(status, user_id)
}

/// Tick or untick a checklist item
pub fn set_checklist_item(
    record: &TriageRecord,
    item_id: &str,
    completed: bool,
) -> Result<TriageRecord, TriageError> {
    record.set_checklist_item(item_id, completed)
}

/// Priority score; 0 unless impact, urgency and complexity are all rated
pub fn compute_priority<F: PriorityFormula + ?Sized>(record: &TriageRecord, formula: &F) -> f64 {
    record.compute_priority(formula)
}

/// Ordered suggestions for a record
pub fn generate_suggestions(
    record: &TriageRecord,
    duplicate_signals: &[SimilaritySignal],
    readiness_signals: &[ReadinessSignal],
    related_discoveries: &[RelatedReference],
) -> Vec<Suggestion> {
    suggestions::generate(record, duplicate_signals, readiness_signals, related_discoveries)
}
