//! Profile endpoints

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{validated, ApiError, Json, MessageResponse, SuccessResponse};
use crate::domain::profile::{Education, Experience, Profile, Social};
use crate::domain::user::{User, UserId};
use crate::domain::validation::{
    validate_education_input, validate_experience_input, validate_profile_input,
};
use crate::infrastructure::github::GitHubRepo;
use crate::infrastructure::profile::{
    EducationRequest, ExperienceRequest, PopulatedProfile, ProfileRequest,
};

/// Create the profile router
pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test))
        .route("/", get(current).post(upsert).delete(delete_account))
        .route("/all", get(list))
        .route("/handle/{handle}", get(by_handle))
        .route("/user/{user_id}", get(by_user))
        .route("/github/{username}", get(github_repos))
        .route("/experience", post(add_experience))
        .route("/experience/{exp_id}", delete(remove_experience))
        .route("/education", post(add_education))
        .route("/education/{edu_id}", delete(remove_education))
}

/// Profile owner: the bare id, or name and avatar when populated
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProfileOwner {
    Populated {
        id: String,
        name: String,
        avatar: String,
    },
    Id(UserId),
}

impl From<&User> for ProfileOwner {
    fn from(user: &User) -> Self {
        Self::Populated {
            id: user.id().to_string(),
            name: user.name().to_string(),
            avatar: user.avatar().to_string(),
        }
    }
}

/// Profile as returned to clients
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user: ProfileOwner,
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

impl ProfileResponse {
    fn with_owner(profile: Profile, owner: ProfileOwner) -> Self {
        Self {
            id: profile.id,
            user: owner,
            handle: profile.handle,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            social: profile.social,
            experience: profile.experience,
            education: profile.education,
            date: profile.date,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let owner = ProfileOwner::Id(profile.user.clone());
        Self::with_owner(profile, owner)
    }
}

impl From<PopulatedProfile> for ProfileResponse {
    /// Falls back to the bare id when the owner account is gone
    fn from((profile, user): PopulatedProfile) -> Self {
        let owner = match user {
            Some(user) => ProfileOwner::from(&user),
            None => ProfileOwner::Id(profile.user.clone()),
        };
        Self::with_owner(profile, owner)
    }
}

/// GET /api/profile/test
pub async fn test() -> Json<MessageResponse> {
    Json(MessageResponse {
        msg: "Profile Works",
    })
}

/// GET /api/profile
pub async fn current(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile_service.get_by_user(user.id()).await?;
    Ok(Json(profile.into()))
}

/// GET /api/profile/all
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let profiles = state.profile_service.list().await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// GET /api/profile/handle/{handle}
pub async fn by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile_service.get_by_handle(&handle).await?;
    Ok(Json(profile.into()))
}

/// GET /api/profile/user/{user_id}
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .profile_service
        .get_by_user(&UserId::new(user_id))
        .await?;
    Ok(Json(profile.into()))
}

/// GET /api/profile/github/{username}
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<GitHubRepo>>, ApiError> {
    debug!(username = %username, "Fetching GitHub repositories");
    let repos = state.github.latest_repos(&username).await?;
    Ok(Json(repos))
}

/// POST /api/profile
pub async fn upsert(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<Value>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let request: ProfileRequest = validated(body, validate_profile_input)?;
    let profile = state.profile_service.upsert(user.id(), request).await?;
    Ok(Json(profile.into()))
}

/// POST /api/profile/experience
pub async fn add_experience(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<Value>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let request: ExperienceRequest = validated(body, validate_experience_input)?;
    let profile = state
        .profile_service
        .add_experience(user.id(), request)
        .await?;
    Ok(Json(profile.into()))
}

/// POST /api/profile/education
pub async fn add_education(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<Value>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let request: EducationRequest = validated(body, validate_education_input)?;
    let profile = state
        .profile_service
        .add_education(user.id(), request)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile/experience/{exp_id}
pub async fn remove_experience(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .profile_service
        .remove_experience(user.id(), &exp_id)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile/education/{edu_id}
pub async fn remove_education(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .profile_service
        .remove_education(user.id(), &edu_id)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile
///
/// Removes the profile and then the account itself.
pub async fn delete_account(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.profile_service.delete_account(user.id()).await?;
    Ok(Json(SuccessResponse::ok()))
}
