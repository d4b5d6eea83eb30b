use sqlx::PgPool;
use storage::{
    dto::{
        auth::{JudgeLoginResponse, RegisterRequest},
        sub_event::SubEventWithEventResponse,
    },
    models::User,
    repository::{
        event::EventRepository, settings::SettingsRepository, sub_event::SubEventRepository,
        user::UserRepository,
    },
    services::credentials,
};

use crate::error::{WebError, WebResult};

/// Create an organizer account
pub async fn register(pool: &PgPool, request: &RegisterRequest) -> WebResult<User> {
    let repo = UserRepository::new(pool);
    let password_hash = credentials::hash_password(&request.password)?;

    let user = repo
        .create(
            request.username.trim(),
            request.email.as_deref().unwrap_or_default(),
            request.first_name.as_deref().unwrap_or_default(),
            request.last_name.as_deref().unwrap_or_default(),
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = user.user_id, "User registered");
    Ok(user)
}

/// Check credentials and hand out the user's token
pub async fn login(pool: &PgPool, username: &str, password: &str) -> WebResult<(String, User)> {
    let repo = UserRepository::new(pool);

    let user = match repo.find_by_username(username).await? {
        Some(user) if user.is_active && credentials::verify_password(password, &user.password_hash) => user,
        _ => {
            tracing::warn!(username, "Failed login attempt");
            return Err(WebError::Unauthorized);
        }
    };

    let token = repo.get_or_create_token(user.user_id).await?;
    tracing::info!(user_id = user.user_id, "User logged in");

    Ok((token, user))
}

pub async fn logout(pool: &PgPool, user_id: i64) -> WebResult<()> {
    UserRepository::new(pool).delete_token(user_id).await?;
    tracing::info!(user_id, "User logged out");
    Ok(())
}

/// Resolve a judge code to the judge and the sub-event they score
pub async fn judge_login(pool: &PgPool, code: &str) -> WebResult<JudgeLoginResponse> {
    let judge = SettingsRepository::new(pool).find_judge_by_code(code).await?;
    let sub_event = SubEventRepository::new(pool)
        .find_by_id(judge.sub_event_id)
        .await?;
    let event = EventRepository::new(pool).find_by_id(sub_event.event_id).await?;

    tracing::info!(judge_id = judge.judge_id, "Judge logged in");

    Ok(JudgeLoginResponse::new(
        judge,
        SubEventWithEventResponse {
            sub_event: sub_event.into(),
            event: event.into(),
        },
    ))
}
