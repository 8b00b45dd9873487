//! Shared API types

pub mod error;
pub mod json;
pub mod response;
pub mod validated;

pub use error::ApiError;
pub use json::Json;
pub use response::{MessageResponse, SuccessResponse};
pub use validated::validated;
