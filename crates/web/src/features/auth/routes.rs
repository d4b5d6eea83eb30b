use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{judge_login, login, logout, profile, register, verify_password};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/verify-password", post(verify_password))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/judge-login", post(judge_login))
        .merge(protected)
}
