use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repo_types::{ParentUpdateDoc, SheetDoc};

#[derive(Debug, Deserialize)]
pub struct ProjectScope {
    pub project_id: String,
}

/// Body for creating a lesson plan or worksheet.
#[derive(Debug, Deserialize)]
pub struct CreateSheetRequest {
    pub project_id: String,
    pub subject: String,
    pub level: String,
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct ParentUpdateBatchRequest {
    pub project_id: String,
    /// One student per line: "name, marks, comments...".
    pub student_data: String,
}

#[derive(Debug, Serialize)]
pub struct SheetResponse {
    pub id: String,
    pub project_id: String,
    pub subject: String,
    pub level: String,
    pub topic: String,
    pub file_name: String,
    pub content: String,
    pub export_format: String,
    pub created_at: DateTime<Utc>,
}

impl From<SheetDoc> for SheetResponse {
    fn from(d: SheetDoc) -> Self {
        Self {
            id: d.id.map(|id| id.to_hex()).unwrap_or_default(),
            project_id: d.project_id,
            subject: d.subject,
            level: d.level,
            topic: d.topic,
            file_name: d.file_name,
            content: d.content,
            export_format: d.export_format,
            created_at: d.created_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParentUpdateResponse {
    pub id: String,
    pub project_id: String,
    pub student_name: String,
    pub marks: String,
    pub comments: String,
    pub file_name: String,
    pub draft_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ParentUpdateDoc> for ParentUpdateResponse {
    fn from(d: ParentUpdateDoc) -> Self {
        Self {
            id: d.id.map(|id| id.to_hex()).unwrap_or_default(),
            project_id: d.project_id,
            student_name: d.student_name,
            marks: d.marks,
            comments: d.comments,
            file_name: d.file_name,
            draft_text: d.draft_text,
            created_at: d.created_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
