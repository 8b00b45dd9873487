use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, security_headers_middleware, MAX_BODY_SIZE};
use super::posts;
use super::profile;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Application API
        .nest("/api/users", users::create_users_router())
        .nest("/api/profile", profile::create_profile_router())
        .nest("/api/posts", posts::create_posts_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // The web client is served from another origin
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::create_app_state_with_config;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET: &str = "router-test-secret";

    async fn app_with(config: AppConfig) -> Router {
        let state = create_app_state_with_config(&config).await.unwrap();
        create_router(state)
    }

    async fn app() -> Router {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some(SECRET.to_string());
        app_with(config).await
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Registers an account and returns its `Bearer ...` token
    async fn sign_up(app: &Router, name: &str, email: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/users/register",
            None,
            Some(json!({"name": name, "email": email, "password": "secret123", "password2": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({"email": email, "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        body["token"].as_str().unwrap().to_string()
    }

    async fn create_post(app: &Router, token: &str, text: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/posts",
            Some(token),
            Some(json!({"text": text})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_smoke_routes() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/api/users/test", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Users Works");

        let (_, body) = send(&app, Method::GET, "/api/profile/test", None, None).await;
        assert_eq!(body["msg"], "Profile Works");

        let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_register_hides_password_hash() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users/register",
            None,
            Some(json!({"name": "Jane", "email": "jane@example.com", "password": "secret123", "password2": "secret123"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@example.com");
        assert!(body["avatar"].as_str().unwrap().starts_with("//www.gravatar.com/avatar/"));
        assert!(body.get("password_hash").is_none());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_validation_and_duplicate() {
        let app = app().await;

        let (status, body) = send(&app, Method::POST, "/api/users/register", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("name").is_some());
        assert!(body.get("email").is_some());
        assert!(body.get("password").is_some());

        sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users/register",
            None,
            Some(json!({"name": "Other", "email": "jane@example.com", "password": "secret123", "password2": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["email"], "Email already exists");
    }

    #[tokio::test]
    async fn test_login_failures() {
        let app = app().await;
        sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["email"], "User not found");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({"email": "jane@example.com", "password": "wrong-password"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["password"], "Password incorrect");
    }

    #[tokio::test]
    async fn test_current_user() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) = send(&app, Method::GET, "/api/users/current", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jane");
        assert_eq!(body["email"], "jane@example.com");
        assert!(body.get("avatar").is_none());
    }

    #[tokio::test]
    async fn test_protected_route_rejections() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/api/users/current", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("unauthorized").is_some());

        let (status, _) = send(&app, Method::GET, "/api/users/current", Some("Token abc"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) =
            send(&app, Method::GET, "/api/users/current", Some("Bearer not.a.jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["unauthorized"], "Invalid token");
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let app = app().await;
        let claims = json!({"id": "someone", "name": "Jane", "avatar": "", "iat": 1, "exp": 2});
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/users/current",
            Some(&format!("Bearer {}", jwt)),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["unauthorized"], "Token has expired");
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) = send(&app, Method::GET, "/api/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["noprofile"], "There is no profile for this user");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({
                "handle": "jane",
                "status": "Developer",
                "skills": "rust, sql ,,axum",
                "company": "Acme",
                "website": "https://jane.dev"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["rust", "sql", "axum"]));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({"handle": "jane", "status": "Developer", "skills": "rust", "company": "Globex"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company"], "Globex");
        assert_eq!(body["website"], "https://jane.dev");

        let (status, body) = send(&app, Method::GET, "/api/profile/handle/jane", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Jane");

        let (status, body) = send(&app, Method::GET, "/api/profile/all", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_handle_collision() {
        let app = app().await;
        let jane = sign_up(&app, "Jane", "jane@example.com").await;
        let john = sign_up(&app, "John", "john@example.com").await;
        let profile = json!({"handle": "dev", "status": "Developer", "skills": "rust"});

        let (status, _) = send(&app, Method::POST, "/api/profile", Some(&jane), Some(profile.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, "/api/profile", Some(&john), Some(profile)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["handle"], "That handle already exists");
    }

    #[tokio::test]
    async fn test_experience_add_and_remove() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;
        let experience = json!({"title": "Engineer", "company": "Acme", "from": "2020-01-01"});

        let (status, _) =
            send(&app, Method::POST, "/api/profile/experience", Some(&token), Some(experience.clone())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &app,
            Method::POST,
            "/api/profile",
            Some(&token),
            Some(json!({"handle": "jane", "status": "Developer", "skills": "rust"})),
        )
        .await;

        let (status, body) =
            send(&app, Method::POST, "/api/profile/experience", Some(&token), Some(experience)).await;
        assert_eq!(status, StatusCode::OK);
        let exp_id = body["experience"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/profile/experience/{}", exp_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["experience"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_revokes_access() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) = send(&app, Method::DELETE, "/api/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, Method::GET, "/api/users/current", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["unauthorized"], "User no longer exists");
    }

    #[tokio::test]
    async fn test_post_like_and_unlike() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;
        let id = create_post(&app, &token, "Hello from the feed!").await;

        let (status, body) = send(&app, Method::POST, &format!("/api/posts/like/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::POST, &format!("/api/posts/like/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["alreadyliked"], "User already liked this post");

        let (status, body) = send(&app, Method::POST, &format!("/api/posts/unlike/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["likes"].as_array().unwrap().is_empty());

        let (status, body) = send(&app, Method::POST, &format!("/api/posts/unlike/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["notliked"], "User has not liked this post yet");
    }

    #[tokio::test]
    async fn test_post_validation() {
        let app = app().await;
        let token = sign_up(&app, "Jane", "jane@example.com").await;

        let (status, body) =
            send(&app, Method::POST, "/api/posts", Some(&token), Some(json!({"text": "too short"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("text").is_some());
    }

    #[tokio::test]
    async fn test_post_delete_requires_owner() {
        let app = app().await;
        let jane = sign_up(&app, "Jane", "jane@example.com").await;
        let john = sign_up(&app, "John", "john@example.com").await;
        let id = create_post(&app, &jane, "Only Jane may delete this").await;
        let uri = format!("/api/posts/{}", id);

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&john), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["notauthorized"], "User not authorized");

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&jane), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["nopostfound"], format!("No post found with the ID: {}", id));
    }

    #[tokio::test]
    async fn test_comment_add_and_delete() {
        let app = app().await;
        let jane = sign_up(&app, "Jane", "jane@example.com").await;
        let john = sign_up(&app, "John", "john@example.com").await;
        let id = create_post(&app, &jane, "Comments welcome on this one").await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/posts/comment/{}", id),
            Some(&john),
            Some(json!({"text": "Great post, thanks for sharing"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let comment_id = body["comments"][0]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/posts/comment/{}/{}", id, comment_id);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&jane), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&john), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["comments"].as_array().unwrap().is_empty());

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&john), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["comment"], "Comment does not exist");
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let app = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_github_unknown_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost/repos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some(SECRET.to_string());
        config.github.api_base_url = server.uri();
        let app = app_with(config).await;

        let (status, body) = send(&app, Method::GET, "/api/profile/github/ghost", None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("githubusername").is_some());
    }
}
