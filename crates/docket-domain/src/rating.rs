//! Rating module - impact, urgency and complexity assessments
//!
//! Ratings are catalog-driven: the ordinal level and its numeric weight both
//! come from the caller's catalog metadata. This crate never looks them up.

use crate::TriageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal level of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingLevel {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Critical (counts as high)
    Critical,
}

impl RatingLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingLevel::Low => "low",
            RatingLevel::Medium => "medium",
            RatingLevel::High => "high",
            RatingLevel::Critical => "critical",
        }
    }

    /// Parse a level from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RatingLevel::Low),
            "medium" => Some(RatingLevel::Medium),
            "high" => Some(RatingLevel::High),
            "critical" => Some(RatingLevel::Critical),
            _ => None,
        }
    }

    /// High or above
    pub fn is_high(&self) -> bool {
        *self >= RatingLevel::High
    }
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RatingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid rating level: {}", s))
    }
}

/// A rating value: ordinal level plus the catalog weight attached to it
///
/// Deserialization runs [`Rating::validate`], so a rating loaded from JSON or
/// TOML never carries a negative or non-finite weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRating")]
pub struct Rating {
    /// Ordinal level
    pub level: RatingLevel,
    /// Numeric weight from catalog metadata
    pub weight: f64,
}

/// Unchecked wire form of [`Rating`]
#[derive(Deserialize)]
struct RawRating {
    level: RatingLevel,
    weight: f64,
}

impl TryFrom<RawRating> for Rating {
    type Error = TriageError;

    fn try_from(raw: RawRating) -> Result<Self, Self::Error> {
        Rating::new(raw.level, raw.weight)
    }
}

impl Rating {
    /// Create a rating, rejecting negative or non-finite weights
    pub fn new(level: RatingLevel, weight: f64) -> Result<Self, TriageError> {
        let rating = Self { level, weight };
        rating.validate()?;
        Ok(rating)
    }

    /// Check the weight of a rating that arrived through deserialization
    pub fn validate(&self) -> Result<(), TriageError> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(TriageError::malformed(format!(
                "rating weight must be a non-negative number, got {}",
                self.weight
            )));
        }
        Ok(())
    }

    /// Shorthand for `self.level.is_high()`
    pub fn is_high(&self) -> bool {
        self.level.is_high()
    }
}

/// Priority formula owned by the complexity rating
///
/// Receives the complexity rating plus the impact and urgency weights exactly
/// as stored on the record. Any closure with the matching signature works.
pub trait PriorityFormula {
    /// Compute a priority score
    fn priority(&self, complexity: &Rating, impact_weight: f64, urgency_weight: f64) -> f64;
}

impl<F> PriorityFormula for F
where
    F: Fn(&Rating, f64, f64) -> f64,
{
    fn priority(&self, complexity: &Rating, impact_weight: f64, urgency_weight: f64) -> f64 {
        self(complexity, impact_weight, urgency_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(RatingLevel::Low < RatingLevel::Medium);
        assert!(RatingLevel::High < RatingLevel::Critical);
        assert!(RatingLevel::Critical.is_high());
        assert!(!RatingLevel::Medium.is_high());
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(Rating::new(RatingLevel::Low, -1.0).is_err());
        assert!(Rating::new(RatingLevel::Low, f64::NAN).is_err());
        assert!(Rating::new(RatingLevel::Low, 0.0).is_ok());
    }

    #[test]
    fn test_deserialize_validates_weight() {
        let ok: Rating = serde_json::from_str(r#"{"level":"high","weight":3.0}"#).unwrap();
        assert_eq!(ok, Rating::new(RatingLevel::High, 3.0).unwrap());

        let err = serde_json::from_str::<Rating>(r#"{"level":"high","weight":-3.0}"#).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_closure_formula() {
        let formula = |c: &Rating, i: f64, u: f64| i + u - c.weight;
        let complexity = Rating::new(RatingLevel::Medium, 1.0).unwrap();
        assert_eq!(formula.priority(&complexity, 3.0, 2.0), 4.0);
    }
}
