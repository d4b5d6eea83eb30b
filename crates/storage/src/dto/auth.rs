use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::sub_event::SubEventWithEventResponse;
use crate::models::{Judge, User};

/// Request payload for registering an organizer account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Username must be between 1 and 150 characters"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(max = 150))]
    #[serde(default)]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Both fields are optional so a missing one can be reported as a 400
/// instead of a deserialization failure
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Non-empty username and password, or `None`
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPasswordRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct JudgeLoginRequest {
    /// Six-digit code, as a string or a number
    #[serde(default)]
    #[schema(value_type = String)]
    pub code: Option<Value>,
}

/// Judge identity handed to the scoring client after a code login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeLoginResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub judge_type: String,
    pub order: i32,
    pub sub_event: SubEventWithEventResponse,
}

impl JudgeLoginResponse {
    pub fn new(judge: Judge, sub_event: SubEventWithEventResponse) -> Self {
        Self {
            id: judge.judge_id,
            name: judge.name,
            judge_type: judge.judge_type,
            order: judge.sort_order,
            sub_event,
        }
    }
}

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    let is_valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_username"))
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
        }
    }
}
