use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
};
use storage::Database;

use super::handlers::{create_case, delete_case, get_case, list_cases, update_case};
use crate::AppState;
use crate::features::{files, notes};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(list_cases).post(create_case))
        .route("/:id", get(get_case).put(update_case).delete(delete_case))
        .route(
            "/:id/notes",
            get(notes::handlers::list_notes).post(notes::handlers::create_note),
        )
        .route(
            "/:id/files",
            get(files::handlers::list_files)
                .post(files::handlers::upload_file)
                .layer(DefaultBodyLimit::max(
                    max_upload_bytes + files::handlers::MULTIPART_OVERHEAD,
                )),
        )
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
