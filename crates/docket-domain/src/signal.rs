//! Signals derived from demands: similarity, readiness and duplicate markers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-term contributions to a composite duplicate score
///
/// Each field is the already-weighted contribution, before final rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    /// Title similarity times its weight
    pub title: f64,
    /// Description similarity times its weight (0 when a description is absent)
    pub description: f64,
    /// Bonus for matching type codes
    pub type_match: f64,
    /// Bonus for matching product identifiers
    pub product_match: f64,
}

impl SimilarityBreakdown {
    /// Sum of all contributions
    pub fn total(&self) -> f64 {
        self.title + self.description + self.type_match + self.product_match
    }
}

/// A candidate demand paired with its similarity to a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilaritySignal {
    /// Candidate demand identifier
    pub candidate_id: String,
    /// Candidate title, kept for display
    pub candidate_title: String,
    /// Composite score in [0, 100]
    pub score: u8,
    /// Contributing sub-scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SimilarityBreakdown>,
}

/// Severity attached to a readiness signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks progress
    Danger,
    /// Should be looked at
    Warning,
    /// Good to go
    Success,
}

/// Kind of readiness observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessKind {
    /// Evidence is required but none was attached
    MissingEvidence,
    /// Description is below the word or character threshold
    VagueDescription,
    /// Description and evidence are enough to proceed
    SufficientContext,
}

impl ReadinessKind {
    /// Severity is fixed per kind
    pub fn severity(&self) -> Severity {
        match self {
            ReadinessKind::MissingEvidence => Severity::Danger,
            ReadinessKind::VagueDescription => Severity::Warning,
            ReadinessKind::SufficientContext => Severity::Success,
        }
    }
}

/// A qualitative observation about whether a demand can progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSignal {
    /// What was observed
    pub kind: ReadinessKind,
    /// Severity of the observation
    pub severity: Severity,
    /// Short human-readable title
    pub title: String,
    /// Longer explanation
    pub description: String,
}

impl ReadinessSignal {
    /// Build a signal with the severity implied by `kind`
    pub fn new(kind: ReadinessKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Textual pattern suggesting a demand references or repeats another
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMarker {
    /// Mentions another demand/ticket/case/issue by number
    ReferenceToOtherDemand,
    /// Uses words like "duplicate" or "same"
    MentionsDuplication,
    /// Title reads "copy of ..."
    CopiedTitle,
}

impl DuplicateMarker {
    /// Get the marker tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateMarker::ReferenceToOtherDemand => "reference_to_other_demand",
            DuplicateMarker::MentionsDuplication => "mentions_duplication",
            DuplicateMarker::CopiedTitle => "copied_title",
        }
    }
}

impl fmt::Display for DuplicateMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_per_kind() {
        let signal = ReadinessSignal::new(ReadinessKind::MissingEvidence, "t", "d");
        assert_eq!(signal.severity, Severity::Danger);
        assert_eq!(ReadinessKind::SufficientContext.severity(), Severity::Success);
    }

    #[test]
    fn test_marker_tags() {
        let json = serde_json::to_string(&DuplicateMarker::ReferenceToOtherDemand).unwrap();
        assert_eq!(json, "\"reference_to_other_demand\"");
        assert_eq!(DuplicateMarker::CopiedTitle.to_string(), "copied_title");
    }
}
