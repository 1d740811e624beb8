use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::ids::OwnerRef;

/// Project record as stored in the `projects` collection.
///
/// `user_id` deserializes through `OwnerRef` because the collection
/// still holds records from before the owner field became a real
/// ObjectId. New records always write the current encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub user_id: OwnerRef,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn deserializes_current_encoding() {
        let owner = ObjectId::new();
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Sec 2 Physics",
            "user_id": owner,
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };
        let project: ProjectDoc = bson::from_document(raw).unwrap();
        assert_eq!(project.user_id, OwnerRef::Id(owner));
    }

    #[test]
    fn deserializes_legacy_encoding() {
        let owner = ObjectId::new();
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Sec 2 Physics",
            "user_id": owner.to_hex(),
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };
        let project: ProjectDoc = bson::from_document(raw).unwrap();
        assert_eq!(project.user_id, OwnerRef::Hex(owner.to_hex()));
        assert!(project.user_id.matches(&owner));
    }
}
