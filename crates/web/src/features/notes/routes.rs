use axum::{Router, middleware, routing::put};
use storage::Database;

use super::handlers::{delete_note, update_note};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    Router::new()
        .route("/:id", put(update_note).delete(delete_note))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
