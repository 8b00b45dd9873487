//! Request payload validation
//!
//! Validators take the raw JSON body and never fail: they always return a
//! [`ValidationResult`] holding a field -> message map. Missing, `null`,
//! non-string and blank values are treated as the empty string, so an absent
//! field and an empty one produce the same message.

mod input;
mod post;
mod profile;
mod result;
mod user;

pub use post::validate_post_input;
pub use profile::{
    validate_education_input, validate_experience_input, validate_profile_input,
    SOCIAL_NETWORKS,
};
pub use result::{ValidationErrors, ValidationResult};
pub use user::{validate_login_input, validate_register_input};
