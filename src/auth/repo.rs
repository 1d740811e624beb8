use anyhow::Context;
use bson::{doc, oid::ObjectId};
use mongodb::Database;

use super::repo_types::UserDoc;

pub const USER_COLLECTION: &str = "users";

/// Find a user by (already lowercased) email.
pub async fn find_by_email(db: &Database, email: &str) -> anyhow::Result<Option<UserDoc>> {
    let user = db
        .collection::<UserDoc>(USER_COLLECTION)
        .find_one(doc! { "email": email })
        .await?;
    Ok(user)
}

/// Find a user by id. A missing user is `None`, not an error; the caller
/// decides how that surfaces.
pub async fn find_by_id(db: &Database, id: ObjectId) -> anyhow::Result<Option<UserDoc>> {
    let user = db
        .collection::<UserDoc>(USER_COLLECTION)
        .find_one(doc! { "_id": id })
        .await?;
    Ok(user)
}

/// Insert a new user and return the generated id.
pub async fn insert(db: &Database, user: &UserDoc) -> anyhow::Result<ObjectId> {
    let result = db
        .collection::<UserDoc>(USER_COLLECTION)
        .insert_one(user)
        .await?;
    result
        .inserted_id
        .as_object_id()
        .context("inserted user id was not an ObjectId")
}
