//! Small response bodies shared across handlers

use serde::Serialize;

/// `{"msg": ...}` returned by the `/test` endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

/// `{"success": true}` returned by deletions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
