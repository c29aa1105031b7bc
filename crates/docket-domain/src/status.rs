//! Status module - workflow stages of a triage record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a demand in the triage workflow
///
/// Every record starts in `PendingTriage`. The other four statuses are
/// terminal: once reached, no further transition is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageStatus {
    /// Waiting for qualification (initial)
    PendingTriage,

    /// Qualified and handed to discovery
    ReadyForDiscovery,

    /// Large enough to become an epic
    EvolvedToEpic,

    /// Shelved without further work
    Archived,

    /// Repeats an existing demand
    Duplicate,
}

impl TriageStatus {
    /// All statuses, in declaration order
    pub const ALL: [TriageStatus; 5] = [
        TriageStatus::PendingTriage,
        TriageStatus::ReadyForDiscovery,
        TriageStatus::EvolvedToEpic,
        TriageStatus::Archived,
        TriageStatus::Duplicate,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageStatus::PendingTriage => "PENDING_TRIAGE",
            TriageStatus::ReadyForDiscovery => "READY_FOR_DISCOVERY",
            TriageStatus::EvolvedToEpic => "EVOLVED_TO_EPIC",
            TriageStatus::Archived => "ARCHIVED",
            TriageStatus::Duplicate => "DUPLICATE",
        }
    }

    /// Parse a status from a string, accepting any case and `-` for `_`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PENDING_TRIAGE" => Some(TriageStatus::PendingTriage),
            "READY_FOR_DISCOVERY" => Some(TriageStatus::ReadyForDiscovery),
            "EVOLVED_TO_EPIC" => Some(TriageStatus::EvolvedToEpic),
            "ARCHIVED" => Some(TriageStatus::Archived),
            "DUPLICATE" => Some(TriageStatus::Duplicate),
            _ => None,
        }
    }

    /// Statuses reachable from this one in a single transition
    pub fn allowed_successors(&self) -> &'static [TriageStatus] {
        match self {
            TriageStatus::PendingTriage => &[
                TriageStatus::ReadyForDiscovery,
                TriageStatus::EvolvedToEpic,
                TriageStatus::Archived,
                TriageStatus::Duplicate,
            ],
            _ => &[],
        }
    }

    /// Whether `target` is a legal next status
    pub fn can_transition_to(&self, target: TriageStatus) -> bool {
        self.allowed_successors().contains(&target)
    }

    /// Terminal statuses have no successors
    pub fn is_terminal(&self) -> bool {
        self.allowed_successors().is_empty()
    }
}

impl fmt::Display for TriageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid triage status: {}", s))
    }
}
