use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::{
    dto::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest},
    guard::authorize_project,
    repo,
};

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

#[instrument(skip(state, user))]
pub async fn list_projects(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = repo::list_by_owner(&state.db, user.id)
        .await
        .map_err(ApiError::store)?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, user, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = repo::insert(&state.db, user.id, &payload.name)
        .await
        .map_err(ApiError::store)?;
    info!(user_id = %user.id, project = %payload.name, "project created");
    Ok((StatusCode::CREATED, Json(project.into())))
}

#[instrument(skip(state, user))]
pub async fn get_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = authorize_project(&state.db, &id, &user.id).await?;
    Ok(Json(project.into()))
}

#[instrument(skip(state, user, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = authorize_project(&state.db, &id, &user.id).await?;
    let project_id = project.id.ok_or_else(|| {
        anyhow::anyhow!("stored project record is missing its id")
    })?;
    repo::update_name(&state.db, project_id, &payload.name)
        .await
        .map_err(ApiError::store)?;

    // Re-read so the response carries the fresh updated_at.
    let updated = repo::find_by_id(&state.db, project_id)
        .await
        .map_err(ApiError::store)?
        .ok_or(ApiError::AccessDenied)?;
    Ok(Json(updated.into()))
}

#[instrument(skip(state, user))]
pub async fn delete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let project = authorize_project(&state.db, &id, &user.id).await?;
    let project_id = project.id.ok_or_else(|| {
        anyhow::anyhow!("stored project record is missing its id")
    })?;
    repo::delete(&state.db, project_id)
        .await
        .map_err(ApiError::store)?;
    info!(user_id = %user.id, project_id = %project_id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
