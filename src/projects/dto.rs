use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::OwnerRef;

use super::repo_types::ProjectDoc;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectDoc> for ProjectResponse {
    fn from(p: ProjectDoc) -> Self {
        let user_id = match &p.user_id {
            OwnerRef::Id(oid) => oid.to_hex(),
            OwnerRef::Hex(s) => s.clone(),
        };
        Self {
            id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: p.name,
            user_id,
            created_at: p.created_at.to_chrono(),
            updated_at: p.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn response_renders_either_owner_encoding_as_hex() {
        let owner = ObjectId::new();
        let make = |user_id| ProjectDoc {
            id: Some(ObjectId::new()),
            name: "Primary 5 Science".into(),
            user_id,
            created_at: bson::DateTime::now(),
            updated_at: bson::DateTime::now(),
        };

        let current: ProjectResponse = make(OwnerRef::Id(owner)).into();
        let legacy: ProjectResponse = make(OwnerRef::Hex(owner.to_hex())).into();
        assert_eq!(current.user_id, legacy.user_id);
        assert_eq!(current.user_id, owner.to_hex());
    }
}
