//! HTTP surface of the judging and case-tracking backend.

use axum::{Router, extract::FromRef};
use storage::Database;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;
pub mod uploads;

use openapi::ApiDoc;
use uploads::UploadStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(db: Database, uploads: UploadStore) -> Self {
        Self { db, uploads }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for UploadStore {
    fn from_ref(state: &AppState) -> Self {
        state.uploads.clone()
    }
}

/// Every `/api` route plus the OpenAPI document and Swagger UI
pub fn build_router(state: AppState) -> Router {
    let db = state.db.clone();
    let max_upload_bytes = state.uploads.max_bytes();

    let api = Router::new()
        .nest("/auth", features::auth::routes::routes(db.clone()))
        .nest("/users", features::users::routes::routes(db.clone()))
        .nest(
            "/cases",
            features::cases::routes::routes(db.clone(), max_upload_bytes),
        )
        .nest("/notes", features::notes::routes::routes(db.clone()))
        .nest("/files", features::files::routes::routes(db.clone()))
        .nest("/events", features::events::routes::routes(db.clone()))
        .nest("/subevents", features::subevents::routes::routes(db))
        .nest("/judges", features::scores::routes::routes());

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
