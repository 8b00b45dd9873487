//! Profile, experience and education validators

use serde_json::Value;

use super::input::{is_length, is_url, text};
use super::result::{ValidationErrors, ValidationResult};

const HANDLE_MIN: usize = 2;
const HANDLE_MAX: usize = 40;

/// Social network link fields accepted on a profile
pub const SOCIAL_NETWORKS: [&str; 5] = ["youtube", "twitter", "facebook", "linkedin", "instagram"];

/// Validate a profile upsert payload
pub fn validate_profile_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    let handle = text(data, "handle");

    if handle.is_empty() {
        errors.insert("handle", "Profile handle field is required");
    } else if !is_length(handle, HANDLE_MIN, HANDLE_MAX) {
        errors.insert("handle", "Handle needs to between 2 and 40 characters");
    }

    if text(data, "status").is_empty() {
        errors.insert("status", "Status field is required");
    }

    if text(data, "skills").is_empty() {
        errors.insert("skills", "Skills field is required");
    }

    for field in std::iter::once("website").chain(SOCIAL_NETWORKS) {
        let value = text(data, field);

        if !value.is_empty() && !is_url(value) {
            errors.insert(field, "Not a valid URL");
        }
    }

    errors.into()
}

/// Validate an experience entry payload
pub fn validate_experience_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();

    require(&mut errors, data, "title", "Job title field is required");
    require(&mut errors, data, "company", "Company field is required");
    require(&mut errors, data, "from", "From date field is required");

    errors.into()
}

/// Validate an education entry payload
pub fn validate_education_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();

    require(&mut errors, data, "school", "School field is required");
    require(&mut errors, data, "degree", "Degree field is required");
    require(&mut errors, data, "fieldofstudy", "Field of study is required");
    require(&mut errors, data, "from", "From date field is required");

    errors.into()
}

fn require(errors: &mut ValidationErrors, data: &Value, field: &str, message: &str) {
    if text(data, field).is_empty() {
        errors.insert(field, message);
    }
}
