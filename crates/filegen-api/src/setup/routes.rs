//! Route wiring

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::HttpAppError;
use crate::handlers::{exports, temporary_files};
use crate::state::AppState;

pub fn setup_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/files", get(temporary_files::list_files))
        .route("/api/v1/exports/csv", post(exports::submit_csv_export))
        .route(
            "/api/v1/files/{id}/download",
            get(temporary_files::download_file),
        )
        .route("/api/v1/files/{id}", delete(temporary_files::delete_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<&'static str, HttpAppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(filegen_core::AppError::from)?;
    Ok("ok")
}
