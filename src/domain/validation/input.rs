//! Field extraction and primitive checks shared by the validators

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)(https?|ftp)://").unwrap());

/// Host part must contain at least one dot (`example.com`, not `localhost`)
static DOTTED_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?|ftp)://([^/?#@]*@)?[^/?#:@.]+(\.[^/?#:@.]+)+(:\d+)?([/?#]|$)")
        .unwrap()
});

/// Read a field as text, normalising missing, `null`, non-string and blank
/// values to the empty string
pub(crate) fn text<'a>(data: &'a Value, field: &str) -> &'a str {
    match data.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
        _ => "",
    }
}

/// Length in characters is within `min..=max`
pub(crate) fn is_length(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub(crate) fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// Accepts `http`, `https` and `ftp` URLs, and bare hosts such as
/// `example.com/path`
pub(crate) fn is_url(value: &str) -> bool {
    let candidate: Cow<'_, str> = if URL_SCHEME.is_match(value) {
        Cow::Borrowed(value)
    } else if value.contains("://") {
        return false;
    } else {
        Cow::Owned(format!("http://{}", value))
    };

    let candidate: &str = &candidate;
    candidate.validate_url() && DOTTED_HOST.is_match(candidate)
}
