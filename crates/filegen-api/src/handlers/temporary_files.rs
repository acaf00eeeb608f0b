//! Temporary file handlers: list, download, delete
//!
//! Thin callers over the service layer. Every id-addressed route checks that
//! the caller owns the record before doing anything with it.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use filegen_core::models::TemporaryFile;
use filegen_core::AppError;
use serde::Serialize;

use crate::auth::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemporaryFileResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub mime_type: Option<String>,
    pub size: i64,
    pub downloadable: bool,
    pub failed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TemporaryFile> for TemporaryFileResponse {
    fn from(file: TemporaryFile) -> Self {
        TemporaryFileResponse {
            id: file.id,
            title: file.title.clone(),
            description: file.description.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size,
            downloadable: file.is_downloadable(),
            failed: file.is_failed(),
            created_at: file.created_at,
        }
    }
}

/// Load a record and verify the caller owns it.
async fn owned_file(
    state: &AppState,
    user: AdminUser,
    id: i64,
) -> Result<TemporaryFile, HttpAppError> {
    let file = state
        .files
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("temporary file {} not found", id)))?;

    if file.user_id != user.user_id {
        return Err(HttpAppError(AppError::Forbidden(
            "temporary file belongs to another user".to_string(),
        )));
    }

    Ok(file)
}

#[tracing::instrument(skip(state), fields(user_id = user.user_id, operation = "list_temporary_files"))]
pub async fn list_files(
    user: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TemporaryFileResponse>>, HttpAppError> {
    let files = state.files.find_by_user(user.user_id).await?;
    Ok(Json(files.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip(state), fields(user_id = user.user_id, record_id = %id, operation = "download_temporary_file"))]
pub async fn download_file(
    user: AdminUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = owned_file(&state, user, id).await?;
    let payload = state.files.load_payload(&file).await?;

    let content_type = file
        .mime_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("attachment; filename=\"{}\"", file.title.replace('"', ""));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        payload,
    ))
}

#[tracing::instrument(skip(state), fields(user_id = user.user_id, record_id = %id, operation = "delete_temporary_file"))]
pub async fn delete_file(
    user: AdminUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, HttpAppError> {
    let file = owned_file(&state, user, id).await?;
    state.files.remove_temporary_file(&file).await?;
    Ok(StatusCode::NO_CONTENT)
}
