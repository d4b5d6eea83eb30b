use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{get_judge_scores, save_judge_scores};
use crate::AppState;

/// Judge endpoints carry no token; possession of the judge code is the credential
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id/scores", get(get_judge_scores))
        .route("/:id/scores/save", post(save_judge_scores))
}
