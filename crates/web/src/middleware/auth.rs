use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use storage::{
    Database, models::User, repository::user::UserRepository, services::credentials::TOKEN_LENGTH,
};

use crate::error::WebError;

/// The user resolved from the request's token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.user_id
    }
}

/// Extract the key from `Authorization: Bearer <key>` or `Authorization: Token <key>`
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") && !scheme.eq_ignore_ascii_case("token") {
        return None;
    }

    let key = key.trim();
    let well_formed = key.len() == TOKEN_LENGTH && key.chars().all(|c| c.is_ascii_alphanumeric());
    well_formed.then_some(key)
}

async fn resolve_user(db: &Database, headers: &HeaderMap) -> Result<Option<User>, WebError> {
    let Some(key) = token_from_headers(headers) else {
        return Ok(None);
    };

    let user = UserRepository::new(db.pool()).find_by_token(key).await?;
    Ok(user)
}

/// Reject requests without a valid token; otherwise attach [`CurrentUser`]
pub async fn require_auth(
    State(db): State<Database>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = resolve_user(&db, req.headers()).await?;

    match user {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        None => {
            tracing::warn!(path = %req.uri().path(), "Rejected request without a valid token");
            Err(WebError::Unauthorized)
        }
    }
}

/// Attach [`CurrentUser`] when a valid token is present; anonymous requests pass through
pub async fn optional_auth(
    State(db): State<Database>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = resolve_user(&db, req.headers()).await?;

    if let Some(user) = user {
        req.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const KEY: &str = "abcdefghijABCDEFGHIJ0123456789abcdefghij";

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_and_token_schemes() {
        assert_eq!(token_from_headers(&headers(&format!("Bearer {}", KEY))), Some(KEY));
        assert_eq!(token_from_headers(&headers(&format!("Token {}", KEY))), Some(KEY));
        assert_eq!(token_from_headers(&headers(&format!("token  {}", KEY))), Some(KEY));
    }

    #[test]
    fn test_malformed_headers_rejected() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
        assert_eq!(token_from_headers(&headers(KEY)), None);
        assert_eq!(token_from_headers(&headers(&format!("Basic {}", KEY))), None);
        assert_eq!(token_from_headers(&headers("Bearer short")), None);
        assert_eq!(
            token_from_headers(&headers(&format!("Bearer {}!", &KEY[1..]))),
            None
        );
    }
}
