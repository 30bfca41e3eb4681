//! The /resumes CRUD surface. JSON bodies throughout; all storage semantics
//! live in the persistence gateway, so these handlers stay thin.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeMeta};
use crate::state::AppState;
use crate::store::ResumeStore;

/// GET /resumes — metadata only, most recently updated first.
pub async fn list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeMeta>>, AppError> {
    let metas = state.store.list().await?;
    Ok(Json(metas))
}

/// POST /resumes — body is a partial Resume; id and timestamps are
/// generated server-side regardless of what the body carries.
pub async fn create_resume(
    State(state): State<AppState>,
    Json(body): Json<Resume>,
) -> Result<Json<Resume>, AppError> {
    let created = state.store.create(body).await?;
    Ok(Json(created))
}

/// GET /resumes/:id
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let resume = state.store.get(&id).await?;
    Ok(Json(resume))
}

/// PUT /resumes/:id — whole-document replace. The id in the body is forced
/// to the path id; an id that was never created is a 404.
pub async fn update_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Resume>,
) -> Result<Json<Resume>, AppError> {
    let updated = state.store.update(&id, body).await?;
    Ok(Json(updated))
}

/// DELETE /resumes/:id — idempotent; deleting an absent id still succeeds.
pub async fn delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.store.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
