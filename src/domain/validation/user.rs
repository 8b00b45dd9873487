//! Registration and login validators

use serde_json::Value;

use super::input::{is_email, is_length, text};
use super::result::{ValidationErrors, ValidationResult};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 30;

/// Validate a registration payload (`name`, `email`, `password`, `password2`)
pub fn validate_register_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();

    // the stored name is trimmed, so the length rule applies to the trimmed value
    let name = text(data, "name").trim();
    let email = text(data, "email");
    let password = text(data, "password");
    let password2 = text(data, "password2");

    if name.is_empty() {
        errors.insert("name", "Name field is required");
    } else if !is_length(name, NAME_MIN, NAME_MAX) {
        errors.insert("name", "Name must be between 2 and 30 characters");
    }

    check_email(&mut errors, email);

    if password.is_empty() {
        errors.insert("password", "Password field is required");
    } else if !is_length(password, PASSWORD_MIN, PASSWORD_MAX) {
        errors.insert("password", "Password must be at least 6 characters");
    }

    if password2.is_empty() {
        errors.insert("password2", "Confirm Password field is required");
    } else if password != password2 {
        errors.insert("password2", "Passwords must match");
    }

    errors.into()
}

/// Validate a login payload (`email`, `password`)
pub fn validate_login_input(data: &Value) -> ValidationResult {
    let mut errors = ValidationErrors::new();

    check_email(&mut errors, text(data, "email"));

    if text(data, "password").is_empty() {
        errors.insert("password", "Password field is required");
    }

    errors.into()
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.insert("email", "Email field is required");
    } else if !is_email(email) {
        errors.insert("email", "Email is invalid");
    }
}
