use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::auth::UserResponse;
use crate::models::{Case, CaseFile, CasePriority, CaseStatus};

/// Request payload for opening a case
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCaseRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Case number must be between 1 and 50 characters"
    ))]
    pub case_number: String,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_case_status"))]
    #[serde(default = "default_status")]
    pub status: String,

    #[validate(custom(function = "validate_case_priority"))]
    #[serde(default = "default_priority")]
    pub priority: String,

    pub assigned_to: Option<i64>,

    pub due_date: Option<NaiveDateTime>,
}

/// Request payload for updating a case; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCaseRequest {
    #[validate(length(min = 1, max = 50))]
    pub case_number: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_case_status"))]
    pub status: Option<String>,

    #[validate(custom(function = "validate_case_priority"))]
    pub priority: Option<String>,

    pub assigned_to: Option<i64>,

    pub due_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseResponse {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<i64>,
    pub created_by: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
}

/// Case with the people involved, its notes and its attachments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseDetailResponse {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<UserResponse>,
    pub created_by: UserResponse,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub notes: Vec<CaseNoteResponse>,
    pub files: Vec<CaseFileResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, message = "Note content cannot be empty"))]
    pub content: String,
}

/// Note joined with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CaseNoteResponse {
    pub id: i64,
    pub case_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseFileResponse {
    pub id: i64,
    pub case_id: i64,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub description: String,
    pub uploaded_by: i64,
    pub uploaded_at: NaiveDateTime,
    pub download_url: String,
}

/// Multipart form accepted by the upload endpoint
#[derive(Debug, ToSchema)]
pub struct UploadFileForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub description: Option<String>,
}

/// Metadata for a file whose bytes have already been written to the store
#[derive(Debug, Clone)]
pub struct NewCaseFile {
    pub storage_key: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub description: String,
}

fn default_status() -> String {
    CaseStatus::Pending.as_str().to_string()
}

fn default_priority() -> String {
    CasePriority::Medium.as_str().to_string()
}

fn validate_case_status(status: &str) -> Result<(), validator::ValidationError> {
    if CaseStatus::ALL.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

fn validate_case_priority(priority: &str) -> Result<(), validator::ValidationError> {
    if CasePriority::ALL.contains(&priority) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_priority"))
    }
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        Self {
            id: case.case_id,
            case_number: case.case_number,
            title: case.title,
            description: case.description,
            status: case.status,
            priority: case.priority,
            assigned_to: case.assigned_to,
            created_by: case.created_by,
            created_at: case.created_at,
            updated_at: case.updated_at,
            due_date: case.due_date,
        }
    }
}

impl From<CaseFile> for CaseFileResponse {
    fn from(file: CaseFile) -> Self {
        Self {
            download_url: format!("/api/files/{}/download", file.file_id),
            id: file.file_id,
            case_id: file.case_id,
            filename: file.filename,
            content_type: file.content_type,
            size_bytes: file.size_bytes,
            description: file.description,
            uploaded_by: file.uploaded_by,
            uploaded_at: file.uploaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_case_defaults() {
        let req: CreateCaseRequest = serde_json::from_value(json!({
            "case_number": "C-2025-001",
            "title": "Missing equipment"
        }))
        .unwrap();

        assert_eq!(req.status, "pending");
        assert_eq!(req.priority, "medium");
        assert_eq!(req.description, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let req: CreateCaseRequest = serde_json::from_value(json!({
            "case_number": "C-1",
            "title": "t",
            "priority": "whenever"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("priority"));
    }
}
