use bson::oid::ObjectId;
use mongodb::Database;
use tracing::warn;

use crate::error::ApiError;
use crate::ids::parse_object_id;

use super::{repo, repo_types::ProjectDoc};

/// Decide whether `caller` may act on the project named by `project_id`.
///
/// One lookup, then a pure comparison against the stored owner reference
/// in whichever encoding the record carries. "No such project" and
/// "project owned by someone else" return the identical error so the
/// existence of other users' projects cannot be probed.
pub async fn authorize_project(
    db: &Database,
    project_id: &str,
    caller: &ObjectId,
) -> Result<ProjectDoc, ApiError> {
    let id = parse_object_id(project_id)?;

    let project = repo::find_by_id(db, id)
        .await
        .map_err(ApiError::store)?
        .ok_or(ApiError::AccessDenied)?;

    if !project.user_id.matches(caller) {
        warn!(project_id = %id, caller = %caller, "project owner mismatch");
        return Err(ApiError::AccessDenied);
    }

    Ok(project)
}
