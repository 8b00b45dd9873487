//! Validation result types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field name -> human readable message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single field message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Outcome of running a validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: ValidationErrors,
    pub is_valid: bool,
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        let is_valid = errors.is_empty();
        Self { errors, is_valid }
    }
}

impl ValidationResult {
    /// Convert into `Err(errors)` when invalid
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_valid() {
        let result = ValidationResult::from(ValidationErrors::new());
        assert!(result.is_valid);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_insert_replaces_message() {
        let mut errors = ValidationErrors::new();
        errors.insert("text", "first");
        errors.insert("text", "second");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("text"), Some("second"));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let errors = ValidationErrors::single("email", "Email is invalid");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"email":"Email is invalid"}"#);
    }
}
