//! Account endpoints: registration, login and the current user

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{validated, ApiError, Json, MessageResponse};
use crate::domain::user::User;
use crate::domain::validation::{validate_login_input, validate_register_input};
use crate::infrastructure::user::{LoginRequest, RegisterRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/current", get(current))
}

/// Registered account, never including the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            avatar: user.avatar().to_string(),
            date: user.date(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// GET /api/users/test
pub async fn test() -> Json<MessageResponse> {
    Json(MessageResponse { msg: "Users Works" })
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UserResponse>, ApiError> {
    let request: RegisterRequest = validated(body, validate_register_input)?;

    let user = state.user_service.register(request).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request: LoginRequest = validated(body, validate_login_input)?;
    debug!(email = %request.email, "Login attempt");

    let token = state.user_service.login(request).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// GET /api/users/current
pub async fn current(RequireUser(user): RequireUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: user.id().to_string(),
        name: user.name().to_string(),
        email: user.email().to_string(),
    })
}
