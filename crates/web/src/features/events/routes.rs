use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{
    create_event, delete_event, get_event, list_events, list_sub_events, update_event,
};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/subevents", get(list_sub_events))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
