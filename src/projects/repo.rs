use anyhow::Context;
use bson::{doc, oid::ObjectId, Bson, DateTime};
use futures::TryStreamExt;
use mongodb::Database;

use crate::ids::OwnerRef;

use super::repo_types::ProjectDoc;

pub const PROJECT_COLLECTION: &str = "projects";

/// List a user's projects. The filter matches the owner id in both its
/// on-disk encodings so pre-migration records still show up.
pub async fn list_by_owner(db: &Database, owner: ObjectId) -> anyhow::Result<Vec<ProjectDoc>> {
    let filter = doc! {
        "user_id": { "$in": [ Bson::ObjectId(owner), Bson::String(owner.to_hex()) ] }
    };
    let cursor = db
        .collection::<ProjectDoc>(PROJECT_COLLECTION)
        .find(filter)
        .await?;
    let projects = cursor.try_collect().await?;
    Ok(projects)
}

pub async fn find_by_id(db: &Database, id: ObjectId) -> anyhow::Result<Option<ProjectDoc>> {
    let project = db
        .collection::<ProjectDoc>(PROJECT_COLLECTION)
        .find_one(doc! { "_id": id })
        .await?;
    Ok(project)
}

/// Create a project owned by `owner`, written with the current encoding.
pub async fn insert(db: &Database, owner: ObjectId, name: &str) -> anyhow::Result<ProjectDoc> {
    let now = DateTime::now();
    let mut project = ProjectDoc {
        id: None,
        name: name.to_string(),
        user_id: OwnerRef::Id(owner),
        created_at: now,
        updated_at: now,
    };
    let result = db
        .collection::<ProjectDoc>(PROJECT_COLLECTION)
        .insert_one(&project)
        .await?;
    project.id = Some(
        result
            .inserted_id
            .as_object_id()
            .context("inserted project id was not an ObjectId")?,
    );
    Ok(project)
}

/// Rename a project. Ownership must have been checked already.
pub async fn update_name(db: &Database, id: ObjectId, name: &str) -> anyhow::Result<()> {
    db.collection::<ProjectDoc>(PROJECT_COLLECTION)
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "name": name, "updated_at": DateTime::now() } },
        )
        .await?;
    Ok(())
}

/// Delete a project. Ownership must have been checked already.
pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<u64> {
    let result = db
        .collection::<ProjectDoc>(PROJECT_COLLECTION)
        .delete_one(doc! { "_id": id })
        .await?;
    Ok(result.deleted_count)
}
