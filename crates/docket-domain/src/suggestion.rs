//! Suggestion module - actionable hints produced for a triager

use serde::{Deserialize, Serialize};

/// Kind of suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Similar demands already exist
    DuplicateWarning,
    /// Related discovery work already exists
    RelatedDiscovery,
    /// Recommended next step
    ActionRecommendation,
}

/// How prominently a suggestion should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// Reference to another entity mentioned by a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedReference {
    /// Entity identifier
    pub id: String,
    /// Entity title
    pub title: String,
    /// Free-text annotation (e.g. "87% similar")
    #[serde(default)]
    pub annotation: String,
}

impl RelatedReference {
    /// Create a reference
    pub fn new(id: impl Into<String>, title: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            annotation: annotation.into(),
        }
    }
}

/// An actionable hint for the person triaging a demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Kind of suggestion
    pub kind: SuggestionKind,
    /// Display priority
    pub priority: SuggestionPriority,
    /// Short title
    pub title: String,
    /// Explanation
    pub description: String,
    /// Entities the suggestion points at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedReference>,
}
