use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{delete_file, download_file, get_file};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_file).delete(delete_file))
        .route("/:id/download", get(download_file))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
