use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Metadata for an uploaded attachment. The bytes live in the upload
/// directory under `storage_key`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CaseFile {
    pub file_id: i64,
    pub case_id: i64,
    pub uploaded_by: i64,
    pub storage_key: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub description: String,
    pub uploaded_at: chrono::NaiveDateTime,
}
