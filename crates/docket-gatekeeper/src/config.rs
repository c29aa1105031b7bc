//! Gatekeeper configuration
//!
//! Catalog-driven metadata the engine needs on every call: duplicate
//! weights, readiness thresholds and the numeric weight of each rating level.
//! The engine keeps none of it between calls; callers load an
//! [`EngineConfig`] and pass the relevant piece in.
//!
//! ```toml
//! [duplicates]
//! threshold = 70
//!
//! [duplicates.weights]
//! title = 0.40
//! description = 0.30
//! type_match = 0.15
//! product_match = 0.15
//!
//! [readiness]
//! min_words = 10
//! min_chars = 50
//! require_evidence = true
//!
//! [catalog.impact]
//! low = 1.0
//! medium = 2.0
//! high = 3.0
//! critical = 4.0
//! ```

use crate::GatekeeperError;
use docket_domain::{Rating, RatingLevel, TriageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerance when checking that duplicate weights sum to at most 1
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights of the composite duplicate score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateWeights {
    /// Title similarity weight
    pub title: f64,
    /// Description similarity weight
    pub description: f64,
    /// Bonus weight for equal type codes
    pub type_match: f64,
    /// Bonus weight for equal product identifiers
    pub product_match: f64,
}

impl Default for DuplicateWeights {
    fn default() -> Self {
        Self {
            title: 0.40,
            description: 0.30,
            type_match: 0.15,
            product_match: 0.15,
        }
    }
}

impl DuplicateWeights {
    /// Weights must be finite, non-negative and sum to at most 1
    pub fn validate(&self) -> Result<(), TriageError> {
        let weights = [self.title, self.description, self.type_match, self.product_match];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(TriageError::malformed(format!(
                "duplicate weights must be non-negative numbers: {:?}",
                self
            )));
        }
        let sum: f64 = weights.iter().sum();
        if sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(TriageError::malformed(format!(
                "duplicate weights sum to {}, which exceeds 1.0",
                sum
            )));
        }
        Ok(())
    }
}

/// Duplicate detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Minimum composite score (0-100) to treat a candidate as a duplicate
    pub threshold: u8,
    /// Composite score weights
    pub weights: DuplicateWeights,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            threshold: 70,
            weights: DuplicateWeights::default(),
        }
    }
}

/// Thresholds for the readiness analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessThresholds {
    /// Minimum word count of a detailed description
    pub min_words: usize,
    /// Minimum character count of a detailed description (after trimming)
    pub min_chars: usize,
    /// Whether at least one piece of evidence is mandatory
    pub require_evidence: bool,
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        Self {
            min_words: 10,
            min_chars: 50,
            require_evidence: true,
        }
    }
}

/// Numeric weight per rating level, as defined by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelWeights {
    /// Weight of `low`
    pub low: f64,
    /// Weight of `medium`
    pub medium: f64,
    /// Weight of `high`
    pub high: f64,
    /// Weight of `critical`
    pub critical: f64,
}

impl Default for LevelWeights {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 2.0,
            high: 3.0,
            critical: 4.0,
        }
    }
}

impl LevelWeights {
    /// Weight attached to `level`
    pub fn weight(&self, level: RatingLevel) -> f64 {
        match level {
            RatingLevel::Low => self.low,
            RatingLevel::Medium => self.medium,
            RatingLevel::High => self.high,
            RatingLevel::Critical => self.critical,
        }
    }

    /// Build a rating for `level` with the catalog weight
    pub fn rating(&self, level: RatingLevel) -> Result<Rating, TriageError> {
        Rating::new(level, self.weight(level))
    }

    fn validate(&self, name: &str) -> Result<(), GatekeeperError> {
        for (level, weight) in [
            ("low", self.low),
            ("medium", self.medium),
            ("high", self.high),
            ("critical", self.critical),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GatekeeperError::Config(format!(
                    "catalog.{}.{} must be a non-negative number, got {}",
                    name, level, weight
                )));
            }
        }
        Ok(())
    }
}

/// Rating weights for the three rated dimensions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingCatalog {
    /// Impact weights
    pub impact: LevelWeights,
    /// Urgency weights
    pub urgency: LevelWeights,
    /// Complexity weights
    pub complexity: LevelWeights,
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duplicate detection
    pub duplicates: DuplicateConfig,
    /// Readiness thresholds
    pub readiness: ReadinessThresholds,
    /// Rating weights
    pub catalog: RatingCatalog,
}

impl EngineConfig {
    /// Lower bars: fewer words needed, evidence optional, looser duplicate threshold
    pub fn lenient() -> Self {
        Self {
            duplicates: DuplicateConfig {
                threshold: 80,
                ..DuplicateConfig::default()
            },
            readiness: ReadinessThresholds {
                min_words: 5,
                min_chars: 20,
                require_evidence: false,
            },
            catalog: RatingCatalog::default(),
        }
    }

    /// Higher bars: longer descriptions and a lower duplicate threshold
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicateConfig {
                threshold: 60,
                ..DuplicateConfig::default()
            },
            readiness: ReadinessThresholds {
                min_words: 20,
                min_chars: 120,
                require_evidence: true,
            },
            catalog: RatingCatalog::default(),
        }
    }

    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, GatekeeperError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GatekeeperError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Check every value is within range
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        self.duplicates
            .weights
            .validate()
            .map_err(|e| GatekeeperError::Config(e.to_string()))?;
        if self.duplicates.threshold > 100 {
            return Err(GatekeeperError::Config(format!(
                "duplicates.threshold must be within [0, 100], got {}",
                self.duplicates.threshold
            )));
        }
        self.catalog.impact.validate("impact")?;
        self.catalog.urgency.validate("urgency")?;
        self.catalog.complexity.validate("complexity")?;
        Ok(())
    }
}
