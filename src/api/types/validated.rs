//! Validate-then-deserialize helper for request bodies

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::validation::ValidationResult;

use super::ApiError;

/// Runs `validator` over the raw body, then reads it into `T`.
///
/// Validation messages win over shape errors; a body that validates but still
/// does not fit `T` (e.g. `current: "yes"`) is answered under the `body` key.
pub fn validated<T: DeserializeOwned>(
    body: Value,
    validator: fn(&Value) -> ValidationResult,
) -> Result<T, ApiError> {
    validator(&body)
        .into_result()
        .map_err(|errors| ApiError::validation(&errors))?;

    serde_json::from_value(body).map_err(|e| {
        debug!(error = %e, "Request body does not match the expected shape");
        ApiError::bad_request("body", e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{validate_experience_input, validate_post_input};
    use crate::infrastructure::post::PostRequest;
    use crate::infrastructure::profile::ExperienceRequest;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_valid_body_is_deserialized() {
        let request: PostRequest =
            validated(json!({"text": "a perfectly fine post"}), validate_post_input).unwrap();
        assert_eq!(request.text, "a perfectly fine post");
        assert!(request.name.is_none());
    }

    #[test]
    fn test_invalid_body_reports_fields() {
        let err = validated::<PostRequest>(json!({"text": "short"}), validate_post_input)
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message("text").is_some());
    }

    #[test]
    fn test_shape_mismatch_after_validation() {
        let body = json!({
            "title": "Engineer",
            "company": "Acme",
            "from": "2020-01-01",
            "current": "yes"
        });

        let err = validated::<ExperienceRequest>(body, validate_experience_input).unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message("body").is_some());
    }
}
