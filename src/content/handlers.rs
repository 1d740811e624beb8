use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use bson::DateTime;
use tracing::{info, instrument};

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::ids::parse_object_id;
use crate::projects::guard::authorize_project;
use crate::state::AppState;

use super::{
    dto::{
        CreateSheetRequest, MessageResponse, ParentUpdateBatchRequest, ParentUpdateResponse,
        ProjectScope, SheetResponse,
    },
    repo,
    repo_types::{ParentUpdateDoc, SheetDoc},
    services,
};

/// Which generated-sheet collection a handler operates on. Lesson plans
/// and worksheets differ only in collection, template and file suffix.
#[derive(Clone, Copy)]
enum SheetKind {
    LessonPlan,
    Worksheet,
}

impl SheetKind {
    fn collection(self) -> &'static str {
        match self {
            SheetKind::LessonPlan => repo::LESSON_PLAN_COLLECTION,
            SheetKind::Worksheet => repo::WORKSHEET_COLLECTION,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SheetKind::LessonPlan => "Lesson Plan",
            SheetKind::Worksheet => "Worksheet",
        }
    }

    fn generate(self, subject: &str, level: &str, topic: &str) -> String {
        match self {
            SheetKind::LessonPlan => services::generate_lesson_plan(subject, level, topic),
            SheetKind::Worksheet => services::generate_worksheet(subject, level, topic),
        }
    }
}

pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/lesson-plans", get(list_lesson_plans).post(create_lesson_plan))
        .route("/lesson-plans/:id", delete(delete_lesson_plan))
        .route("/worksheets", get(list_worksheets).post(create_worksheet))
        .route("/worksheets/:id", delete(delete_worksheet))
        .route("/parent-updates", get(list_parent_updates))
        .route("/parent-updates/batch-generate", post(batch_generate_parent_updates))
        .route("/parent-updates/:id", delete(delete_parent_update))
}

// --- shared sheet logic ---

async fn list_sheets(
    state: &AppState,
    user: &CurrentUser,
    kind: SheetKind,
    project_id: &str,
) -> Result<Vec<SheetResponse>, ApiError> {
    authorize_project(&state.db, project_id, &user.id).await?;
    let sheets: Vec<SheetDoc> = repo::list_by_project(&state.db, kind.collection(), project_id)
        .await
        .map_err(ApiError::store)?;
    Ok(sheets.into_iter().map(Into::into).collect())
}

async fn create_sheet(
    state: &AppState,
    user: &CurrentUser,
    kind: SheetKind,
    payload: CreateSheetRequest,
) -> Result<SheetResponse, ApiError> {
    authorize_project(&state.db, &payload.project_id, &user.id).await?;

    let content = kind.generate(&payload.subject, &payload.level, &payload.topic);
    let mut sheet = SheetDoc {
        id: None,
        project_id: payload.project_id,
        file_name: format!(
            "{}-{}-{}-{}.txt",
            payload.subject,
            payload.level,
            payload.topic,
            kind.label().replace(' ', "")
        ),
        subject: payload.subject,
        level: payload.level,
        topic: payload.topic,
        content,
        export_format: "pdf".into(),
        created_at: DateTime::now(),
    };
    let id = repo::insert(&state.db, kind.collection(), &sheet)
        .await
        .map_err(ApiError::store)?;
    sheet.id = Some(id);

    info!(user_id = %user.id, sheet_id = %id, kind = kind.label(), "sheet generated");
    Ok(sheet.into())
}

async fn delete_sheet(
    state: &AppState,
    user: &CurrentUser,
    kind: SheetKind,
    id: &str,
) -> Result<MessageResponse, ApiError> {
    let oid = parse_object_id(id)?;
    let sheet: SheetDoc = repo::find_by_id(&state.db, kind.collection(), oid)
        .await
        .map_err(ApiError::store)?
        .ok_or(ApiError::NotFound(kind.label()))?;

    // Ownership is transitive: the sheet belongs to whoever owns its
    // parent project.
    authorize_project(&state.db, &sheet.project_id, &user.id).await?;

    repo::delete_by_id(&state.db, kind.collection(), oid)
        .await
        .map_err(ApiError::store)?;
    info!(user_id = %user.id, sheet_id = %oid, kind = kind.label(), "sheet deleted");
    Ok(MessageResponse {
        message: match kind {
            SheetKind::LessonPlan => "Lesson Plan deleted successfully",
            SheetKind::Worksheet => "Worksheet deleted successfully",
        },
    })
}

// --- lesson plans ---

#[instrument(skip(state, user))]
pub async fn list_lesson_plans(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<ProjectScope>,
) -> Result<Json<Vec<SheetResponse>>, ApiError> {
    let sheets = list_sheets(&state, &user, SheetKind::LessonPlan, &scope.project_id).await?;
    Ok(Json(sheets))
}

#[instrument(skip(state, user, payload))]
pub async fn create_lesson_plan(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateSheetRequest>,
) -> Result<Json<SheetResponse>, ApiError> {
    let sheet = create_sheet(&state, &user, SheetKind::LessonPlan, payload).await?;
    Ok(Json(sheet))
}

#[instrument(skip(state, user))]
pub async fn delete_lesson_plan(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let msg = delete_sheet(&state, &user, SheetKind::LessonPlan, &id).await?;
    Ok(Json(msg))
}

// --- worksheets ---

#[instrument(skip(state, user))]
pub async fn list_worksheets(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<ProjectScope>,
) -> Result<Json<Vec<SheetResponse>>, ApiError> {
    let sheets = list_sheets(&state, &user, SheetKind::Worksheet, &scope.project_id).await?;
    Ok(Json(sheets))
}

#[instrument(skip(state, user, payload))]
pub async fn create_worksheet(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateSheetRequest>,
) -> Result<Json<SheetResponse>, ApiError> {
    let sheet = create_sheet(&state, &user, SheetKind::Worksheet, payload).await?;
    Ok(Json(sheet))
}

#[instrument(skip(state, user))]
pub async fn delete_worksheet(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let msg = delete_sheet(&state, &user, SheetKind::Worksheet, &id).await?;
    Ok(Json(msg))
}

// --- parent updates ---

#[instrument(skip(state, user))]
pub async fn list_parent_updates(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<ProjectScope>,
) -> Result<Json<Vec<ParentUpdateResponse>>, ApiError> {
    authorize_project(&state.db, &scope.project_id, &user.id).await?;
    let updates: Vec<ParentUpdateDoc> =
        repo::list_by_project(&state.db, repo::PARENT_UPDATE_COLLECTION, &scope.project_id)
            .await
            .map_err(ApiError::store)?;
    Ok(Json(updates.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, user, payload))]
pub async fn batch_generate_parent_updates(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ParentUpdateBatchRequest>,
) -> Result<Json<Vec<ParentUpdateResponse>>, ApiError> {
    authorize_project(&state.db, &payload.project_id, &user.id).await?;

    let mut generated = Vec::new();
    for line in services::parse_student_lines(&payload.student_data) {
        let draft_text = services::generate_parent_update(&line.name, &line.marks, &line.comments);
        let mut update = ParentUpdateDoc {
            id: None,
            project_id: payload.project_id.clone(),
            file_name: format!("{}-Update.txt", line.name),
            student_name: line.name,
            marks: line.marks,
            comments: line.comments,
            draft_text,
            created_at: DateTime::now(),
        };
        let id = repo::insert(&state.db, repo::PARENT_UPDATE_COLLECTION, &update)
            .await
            .map_err(ApiError::store)?;
        update.id = Some(id);
        generated.push(update.into());
    }

    info!(user_id = %user.id, count = generated.len(), "parent updates generated");
    Ok(Json(generated))
}

#[instrument(skip(state, user))]
pub async fn delete_parent_update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id)?;
    let update: ParentUpdateDoc =
        repo::find_by_id(&state.db, repo::PARENT_UPDATE_COLLECTION, oid)
            .await
            .map_err(ApiError::store)?
            .ok_or(ApiError::NotFound("Parent Update"))?;

    authorize_project(&state.db, &update.project_id, &user.id).await?;

    repo::delete_by_id(&state.db, repo::PARENT_UPDATE_COLLECTION, oid)
        .await
        .map_err(ApiError::store)?;
    info!(user_id = %user.id, update_id = %oid, "parent update deleted");
    Ok(Json(MessageResponse {
        message: "Parent Update deleted successfully",
    }))
}
