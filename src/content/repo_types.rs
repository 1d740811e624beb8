use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Generated sheet record. Lesson plans and worksheets share this shape
/// and live in separate collections; ownership is never stored here, it
/// is derived through the parent project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: String, // hex id of the parent project
    pub subject: String,
    pub level: String,
    pub topic: String,
    pub file_name: String,
    pub content: String,
    pub export_format: String,
    pub created_at: DateTime,
}

/// Parent update record, one per student line of a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentUpdateDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: String,
    pub student_name: String,
    pub marks: String,
    pub comments: String,
    pub file_name: String,
    pub draft_text: String,
    pub created_at: DateTime,
}
