use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        auth::{
            JudgeLoginRequest, JudgeLoginResponse, LoginRequest, LoginResponse, RegisterRequest,
            UserResponse, VerifyPasswordRequest, VerifyPasswordResponse,
        },
        common::MessageResponse,
    },
    services::{credentials, judge_code},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    ),
    tag = "auth"
)]
pub async fn register(
    State(db): State<Database>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::register(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    let (username, password) = req.credentials().ok_or_else(|| {
        WebError::BadRequest("Both username and password are required".to_string())
    })?;

    let (token, user) = services::login(db.pool(), username, password).await?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    services::logout(db.pool(), user.id()).await?;

    Ok(Json(MessageResponse::new("Successfully logged out")).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn profile(Extension(user): Extension<CurrentUser>) -> Result<Response, WebError> {
    Ok(Json(UserResponse::from(user.0)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-password",
    request_body = VerifyPasswordRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Whether the password matches", body = VerifyPasswordResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn verify_password(
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<VerifyPasswordRequest>,
) -> Result<Response, WebError> {
    let valid = credentials::verify_password(&req.password, &user.0.password_hash);

    Ok(Json(VerifyPasswordResponse { valid }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/judge-login",
    request_body = JudgeLoginRequest,
    responses(
        (status = 200, description = "Judge with sub-event and event", body = JudgeLoginResponse),
        (status = 400, description = "Code missing or not six digits"),
        (status = 404, description = "No judge with this code")
    ),
    tag = "auth"
)]
pub async fn judge_login(
    State(db): State<Database>,
    Json(req): Json<JudgeLoginRequest>,
) -> Result<Response, WebError> {
    let code = req
        .code
        .as_ref()
        .and_then(judge_code::from_value)
        .filter(|code| judge_code::is_well_formed(code))
        .ok_or_else(|| WebError::BadRequest("A six-digit judge code is required".to_string()))?;

    let judge = services::judge_login(db.pool(), &code).await?;

    Ok(Json(judge).into_response())
}
