//! Triage module - the per-demand qualification record and its state machine
//!
//! Every mutator borrows the record and returns an updated copy. On error the
//! caller still holds the untouched original, so no call can leave a record
//! half-updated.

use crate::{PriorityFormula, Rating, TriageError, TriageStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current timestamp in milliseconds since Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Unique identifier for a triage record based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriageId(uuid::Uuid);

impl TriageId {
    /// Generate a new UUIDv7-based TriageId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a TriageId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid triage id: {}", e))
    }
}

impl Default for TriageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TriageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A readiness criterion tracked per triage record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable item identifier
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Required items gate readiness for discovery
    pub required: bool,
    /// Whether the item has been ticked
    pub completed: bool,
    /// Set iff `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

/// Seed checklist: `(id, label, required)`
const DEFAULT_CHECKLIST: [(&str, &str, bool); 7] = [
    ("problem_described", "Problem is clearly described", true),
    ("impact_assessed", "Business impact assessed", true),
    ("urgency_assessed", "Urgency assessed", true),
    ("complexity_estimated", "Complexity estimated", true),
    ("duplicates_checked", "Checked for duplicate demands", true),
    ("evidence_attached", "Evidence attached (screenshots, logs, data)", false),
    ("stakeholders_identified", "Stakeholders identified", false),
];

/// The default checklist every new record starts with (7 items, 5 required)
pub fn default_checklist() -> Vec<ChecklistItem> {
    DEFAULT_CHECKLIST
        .iter()
        .map(|(id, label, required)| ChecklistItem {
            id: (*id).to_string(),
            label: (*label).to_string(),
            required: *required,
            completed: false,
            completed_at: None,
        })
        .collect()
}

/// Checklist completion counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    /// Completed items
    pub completed: usize,
    /// All items
    pub total: usize,
    /// Completed required items
    pub required_completed: usize,
    /// Required items
    pub required_total: usize,
}

/// Per-demand triage state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRecord {
    /// Unique identifier
    pub id: TriageId,

    /// Owning demand (1:1)
    pub demand_id: String,

    /// Current workflow status
    pub status: TriageStatus,

    /// Business impact
    #[serde(default)]
    pub impact: Option<Rating>,

    /// Urgency
    #[serde(default)]
    pub urgency: Option<Rating>,

    /// Estimated complexity
    #[serde(default)]
    pub complexity: Option<Rating>,

    /// Ordered readiness checklist
    pub checklist: Vec<ChecklistItem>,

    /// User who moved the record to a terminal status
    #[serde(default)]
    pub triaged_by: Option<String>,

    /// When the record reached a terminal status (ms since epoch)
    #[serde(default)]
    pub triaged_at: Option<u64>,

    /// Monotonic revision counter
    pub revision: u64,

    /// Last update (ms since epoch)
    pub updated_at: u64,
}

impl TriageRecord {
    /// Create a pending record for `demand_id` with the default checklist
    pub fn new(demand_id: impl Into<String>) -> Result<Self, TriageError> {
        Self::new_at(demand_id, current_timestamp())
    }

    /// Same as [`TriageRecord::new`] with an explicit clock reading
    pub fn new_at(demand_id: impl Into<String>, now: u64) -> Result<Self, TriageError> {
        let demand_id = demand_id.into();
        if demand_id.trim().is_empty() {
            return Err(TriageError::malformed("demand id must not be empty"));
        }

        Ok(Self {
            id: TriageId::new(),
            demand_id,
            status: TriageStatus::PendingTriage,
            impact: None,
            urgency: None,
            complexity: None,
            checklist: default_checklist(),
            triaged_by: None,
            triaged_at: None,
            revision: 0,
            updated_at: now,
        })
    }

    /// Move to `target`, stamping the acting user on terminal statuses
    pub fn transition(&self, target: TriageStatus, acting_user: &str) -> Result<Self, TriageError> {
        self.transition_at(target, acting_user, current_timestamp())
    }

    /// Same as [`TriageRecord::transition`] with an explicit clock reading
    pub fn transition_at(
        &self,
        target: TriageStatus,
        acting_user: &str,
        now: u64,
    ) -> Result<Self, TriageError> {
        if acting_user.trim().is_empty() {
            return Err(TriageError::malformed("acting user id must not be empty"));
        }
        if !self.status.can_transition_to(target) {
            tracing::warn!(
                triage_id = %self.id,
                from = %self.status,
                to = %target,
                "Rejected triage transition"
            );
            return Err(TriageError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let mut next = self.clone();
        next.status = target;
        next.touch(now);
        if target.is_terminal() {
            next.triaged_by = Some(acting_user.to_string());
            next.triaged_at = Some(next.updated_at);
        }

        tracing::info!(
            triage_id = %next.id,
            demand_id = %next.demand_id,
            from = %self.status,
            to = %target,
            user = acting_user,
            "Triage transition"
        );
        Ok(next)
    }

    /// Tick or untick a checklist item
    pub fn set_checklist_item(&self, item_id: &str, completed: bool) -> Result<Self, TriageError> {
        self.set_checklist_item_at(item_id, completed, current_timestamp())
    }

    /// Same as [`TriageRecord::set_checklist_item`] with an explicit clock reading
    pub fn set_checklist_item_at(
        &self,
        item_id: &str,
        completed: bool,
        now: u64,
    ) -> Result<Self, TriageError> {
        let index = self
            .checklist
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| TriageError::ChecklistItemNotFound(item_id.to_string()))?;

        let mut next = self.clone();
        next.touch(now);
        let stamp = next.updated_at;
        let item = &mut next.checklist[index];
        // Re-ticking keeps the original timestamp; a completed item loaded
        // without one gets stamped now
        if completed {
            if item.completed_at.is_none() {
                item.completed_at = Some(stamp);
            }
        } else {
            item.completed_at = None;
        }
        item.completed = completed;

        tracing::debug!(triage_id = %next.id, item = item_id, completed, "Checklist item updated");
        Ok(next)
    }

    /// Replace the impact, urgency and complexity ratings
    ///
    /// Terminal records are frozen and refuse new ratings.
    pub fn set_ratings(
        &self,
        impact: Option<Rating>,
        urgency: Option<Rating>,
        complexity: Option<Rating>,
    ) -> Result<Self, TriageError> {
        self.set_ratings_at(impact, urgency, complexity, current_timestamp())
    }

    /// Same as [`TriageRecord::set_ratings`] with an explicit clock reading
    pub fn set_ratings_at(
        &self,
        impact: Option<Rating>,
        urgency: Option<Rating>,
        complexity: Option<Rating>,
        now: u64,
    ) -> Result<Self, TriageError> {
        if self.status.is_terminal() {
            return Err(TriageError::malformed(format!(
                "record {} is {} and can no longer be rated",
                self.id, self.status
            )));
        }
        for rating in [&impact, &urgency, &complexity].into_iter().flatten() {
            rating.validate()?;
        }

        let mut next = self.clone();
        next.impact = impact;
        next.urgency = urgency;
        next.complexity = complexity;
        next.touch(now);
        Ok(next)
    }

    /// Return a copy with the revision counter raised by one
    pub fn bump_revision(&self) -> Self {
        let mut next = self.clone();
        next.revision = next.revision.saturating_add(1);
        next.touch(current_timestamp());
        next
    }

    /// All required items done and all three ratings present
    pub fn is_ready_for_discovery(&self) -> bool {
        let required_done = self
            .checklist
            .iter()
            .all(|item| !item.required || item.completed);
        required_done && self.impact.is_some() && self.urgency.is_some() && self.complexity.is_some()
    }

    /// Priority score; 0 unless impact, urgency and complexity are all rated
    pub fn compute_priority<F: PriorityFormula + ?Sized>(&self, formula: &F) -> f64 {
        match (&self.impact, &self.urgency, &self.complexity) {
            (Some(impact), Some(urgency), Some(complexity)) => {
                formula.priority(complexity, impact.weight, urgency.weight)
            }
            _ => 0.0,
        }
    }

    /// Completion counts over the checklist
    pub fn checklist_progress(&self) -> ChecklistProgress {
        let mut progress = ChecklistProgress {
            completed: 0,
            total: self.checklist.len(),
            required_completed: 0,
            required_total: 0,
        };
        for item in &self.checklist {
            if item.completed {
                progress.completed += 1;
            }
            if item.required {
                progress.required_total += 1;
                if item.completed {
                    progress.required_completed += 1;
                }
            }
        }
        progress
    }

    /// `updated_at` strictly advances on every change, even within one millisecond
    fn touch(&mut self, now: u64) {
        self.updated_at = now.max(self.updated_at.saturating_add(1));
    }
}
