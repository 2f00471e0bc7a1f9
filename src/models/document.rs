use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a document: created `pending`, finalized at most once to
/// `approved` or `rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "document_status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

/// The terminal state an approver assigns. Deliberately excludes `pending`
/// so "approve back to pending" is unrepresentable in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }
}

impl ApprovalDecision {
    pub fn status(self) -> DocumentStatus {
        match self {
            ApprovalDecision::Approved => DocumentStatus::Approved,
            ApprovalDecision::Rejected => DocumentStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub document_type_id: Uuid,
    pub uploaded_by: Uuid,
    pub status: DocumentStatus,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: document plus the joined uploader and type names, fetched by
/// an explicit join in the db layer.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DocumentWithRelations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub document: Document,
    pub uploader_username: String,
    pub uploader_email: String,
    pub document_type_name: String,
}
