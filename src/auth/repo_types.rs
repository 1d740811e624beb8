use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User record as stored in the `users` collection. Emails are
/// lowercased before storage so the unique index doubles as a
/// case-insensitive uniqueness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    // Argon2 PHC string; serialized for storage only, responses go
    // through UserResponse which never carries it.
    pub hashed_password: String,
}
