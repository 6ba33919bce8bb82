use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use time::{format_description::well_known::Rfc2822, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            EndpointsResponse, LoginForm, MessageResponse, RegisterForm, UserCountResponse,
            UsersResponse,
        },
        password::{hash_password, verify_password},
        repo::User,
    },
};

pub const ENDPOINTS: &[&str] = &[
    "/hello",
    "/endpoints",
    "/register",
    "/login",
    "/usercount",
    "/users",
];

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/endpoints", get(endpoints))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/usercount", get(user_count))
        .route("/users", get(list_users))
}

pub async fn hello() -> Json<MessageResponse> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc2822)
        .unwrap_or_default();
    Json(MessageResponse {
        message: format!("Hello, the current time is {now}"),
    })
}

pub async fn endpoints() -> Json<EndpointsResponse> {
    Json(EndpointsResponse {
        endpoints: ENDPOINTS,
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Form<RegisterForm>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Form(form)) = payload else {
        warn!("malformed registration form");
        return Err(ApiError::Parse("Invalid input"));
    };

    let hash = hash_password(&form.password)?;
    let user = User::create(&state.db, &form.username, &form.email, &hash).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("User {} registered successfully", user.username),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Form<LoginForm>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(Form(form)) = payload else {
        warn!("malformed login form");
        return Err(ApiError::Parse("Invalid input"));
    };

    // Unknown username and wrong password produce the same response.
    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %form.username, "login unknown username");
            return Err(ApiError::Auth("Invalid username or password"));
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(user_id = user.id, username = %user.username, "login invalid password");
        return Err(ApiError::Auth("Invalid username or password"));
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(MessageResponse {
        message: format!("User {} logged in successfully", user.username),
    }))
}

#[instrument(skip(state))]
pub async fn user_count(State(state): State<AppState>) -> Result<Json<UserCountResponse>, ApiError> {
    let user_count = User::count(&state.db).await?;
    Ok(Json(UserCountResponse { user_count }))
}

#[instrument(skip(state, headers))]
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UsersResponse>, ApiError> {
    if !state.authorizer.authorize(&headers) {
        warn!("unauthorized user listing attempt");
        return Err(ApiError::Auth("Unauthorized"));
    }

    let users = User::list_all(&state.db).await?;
    Ok(Json(UsersResponse { users }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        crate::app::build_app(AppState::fake())
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn hello_reports_current_time() {
        let res = app()
            .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Hello, the current time is "));
    }

    #[tokio::test]
    async fn endpoints_lists_all_six_routes() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/endpoints")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let listed = json["endpoints"].as_array().unwrap();
        assert_eq!(listed.len(), 6);
        for path in ENDPOINTS {
            assert!(listed.iter().any(|v| v == path));
        }
    }

    #[tokio::test]
    async fn register_rejects_non_form_body() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"username":"alice"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("username=alice&email=a@x.com"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_rejects_missing_fields() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("username=alice"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn users_requires_bearer_token() {
        let res = app()
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert!(json.get("users").is_none());
    }

    #[tokio::test]
    async fn users_rejects_wrong_bearer_token() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header("authorization", "Bearer wrong-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert!(json.get("users").is_none());
    }
}
