use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// What an uploaded file is for; also the first segment of its storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    ComplaintImage,
    ProofDocument,
}

impl FilePurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            FilePurpose::ComplaintImage => "complaint_image",
            FilePurpose::ProofDocument => "proof_document",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "complaint_image" => Some(FilePurpose::ComplaintImage),
            "proof_document" => Some(FilePurpose::ProofDocument),
            _ => None,
        }
    }
}

/// Database model for files
#[derive(Debug, Clone, FromRow)]
pub struct StoredFile {
    pub id: Uuid,
    pub file_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub purpose: String,
    pub uploaded_by: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStoredFile {
    pub file_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub purpose: FilePurpose,
    pub uploaded_by: Uuid,
}
