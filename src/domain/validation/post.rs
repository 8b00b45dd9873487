//! Post and comment text validator

use serde_json::Value;

use super::input::{is_length, text};
use super::result::{ValidationErrors, ValidationResult};

pub const TEXT_MIN: usize = 10;
pub const TEXT_MAX: usize = 300;

/// Validate the `text` of a post or a comment
pub fn validate_post_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    let body = text(data, "text");

    if body.is_empty() {
        errors.insert("text", "Text field is required");
    } else if !is_length(body, TEXT_MIN, TEXT_MAX) {
        errors.insert("text", "Post must be between 10 and 300 characters");
    }

    errors.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_len(len: usize) -> Value {
        json!({ "text": "a".repeat(len) })
    }

    #[test]
    fn test_length_boundaries() {
        assert!(!validate_post_input(&with_len(9)).is_valid);
        assert!(validate_post_input(&with_len(10)).is_valid);
        assert!(validate_post_input(&with_len(300)).is_valid);
        assert!(!validate_post_input(&with_len(301)).is_valid);
    }

    #[test]
    fn test_length_message() {
        let result = validate_post_input(&with_len(9));
        assert_eq!(
            result.errors.get("text"),
            Some("Post must be between 10 and 300 characters")
        );
    }

    #[test]
    fn test_missing_text() {
        let result = validate_post_input(&json!({ "name": "Jane" }));
        assert_eq!(result.errors.get("text"), Some("Text field is required"));
    }
}
