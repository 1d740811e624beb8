use anyhow::Context;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Database;
use serde::{de::DeserializeOwned, Serialize};

pub const LESSON_PLAN_COLLECTION: &str = "lesson_plans";
pub const WORKSHEET_COLLECTION: &str = "worksheets";
pub const PARENT_UPDATE_COLLECTION: &str = "parent_updates";

/// The three document collections are structurally parallel, so the
/// repo is generic over the record type and keyed by collection name.
pub async fn list_by_project<T>(
    db: &Database,
    collection: &str,
    project_id: &str,
) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    let cursor = db
        .collection::<T>(collection)
        .find(doc! { "project_id": project_id })
        .await?;
    let docs = cursor.try_collect().await?;
    Ok(docs)
}

pub async fn insert<T>(db: &Database, collection: &str, item: &T) -> anyhow::Result<ObjectId>
where
    T: Serialize + Send + Sync,
{
    let result = db.collection::<T>(collection).insert_one(item).await?;
    result
        .inserted_id
        .as_object_id()
        .context("inserted document id was not an ObjectId")
}

pub async fn find_by_id<T>(
    db: &Database,
    collection: &str,
    id: ObjectId,
) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    let found = db
        .collection::<T>(collection)
        .find_one(doc! { "_id": id })
        .await?;
    Ok(found)
}

pub async fn delete_by_id(db: &Database, collection: &str, id: ObjectId) -> anyhow::Result<u64> {
    let result = db
        .collection::<bson::Document>(collection)
        .delete_one(doc! { "_id": id })
        .await?;
    Ok(result.deleted_count)
}
