use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{get_user, list_users};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
