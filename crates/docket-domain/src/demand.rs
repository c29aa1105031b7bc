//! Demand module - the incoming work item being triaged
//!
//! Demands are owned by the caller. The engine only reads them.

use crate::TriageError;
use serde::{Deserialize, Serialize};

/// An incoming work item (idea, bug, opportunity) awaiting classification
///
/// Classification fields hold opaque catalog codes; the engine only compares
/// them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// Caller-assigned identifier
    pub id: String,

    /// Short title (must not be blank)
    pub title: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type code (bug, idea, improvement, ...)
    #[serde(default)]
    pub type_code: String,

    /// Origin code (customer, internal, support, ...)
    #[serde(default)]
    pub origin_code: String,

    /// Priority code as recorded by the submitter
    #[serde(default)]
    pub priority_code: String,

    /// Status code in the owning system
    #[serde(default)]
    pub status_code: String,

    /// Product the demand belongs to
    #[serde(default)]
    pub product_id: String,
}

impl Demand {
    /// Create a demand with only the mandatory fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            type_code: String::new(),
            origin_code: String::new(),
            priority_code: String::new(),
            status_code: String::new(),
            product_id: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the type code
    pub fn with_type(mut self, type_code: impl Into<String>) -> Self {
        self.type_code = type_code.into();
        self
    }

    /// Set the product identifier
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    /// Description if present and not blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Reject demands missing an identifier or a title
    pub fn validate(&self) -> Result<(), TriageError> {
        if self.id.trim().is_empty() {
            return Err(TriageError::malformed("demand id must not be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(TriageError::malformed(format!(
                "demand '{}' has an empty title",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Demand::new("d-1", "Export fails").validate().is_ok());
        assert!(Demand::new("", "Export fails").validate().is_err());
        assert!(Demand::new("d-1", "   ").validate().is_err());
    }

    #[test]
    fn test_blank_description_is_absent() {
        let demand = Demand::new("d-1", "Export fails").with_description("  \n ");
        assert_eq!(demand.description_text(), None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let demand: Demand =
            serde_json::from_str(r#"{"id": "d-9", "title": "Login slow"}"#).unwrap();
        assert_eq!(demand.description, None);
        assert_eq!(demand.product_id, "");
    }
}
