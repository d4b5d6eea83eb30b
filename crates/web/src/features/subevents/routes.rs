use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_sub_event, delete_sub_event, get_sub_event, list_owned_sub_events, update_sub_event,
};
use crate::AppState;
use crate::features::{scoreboard, settings};
use crate::middleware::auth::{optional_auth, require_auth};

pub fn routes(db: Database) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_owned_sub_events).post(create_sub_event))
        .route("/:id", put(update_sub_event).delete(delete_sub_event))
        .route("/:id/settings", post(settings::handlers::save_settings))
        .route("/:id/scoreboard", get(scoreboard::handlers::get_scoreboard))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_auth));

    let open = Router::new()
        .route("/:id", get(get_sub_event))
        .route("/:id/settings", get(settings::handlers::get_settings))
        .route_layer(middleware::from_fn_with_state(db, optional_auth));

    Router::new().merge(open).merge(protected)
}
