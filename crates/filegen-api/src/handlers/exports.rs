//! CSV export submission
//!
//! A concrete `FileGenerator` for tabular exports, plus the handler that
//! submits one on behalf of the caller. Generation runs off the request;
//! the response only carries the placeholder record id.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, Json};
use filegen_core::AppError;
use filegen_services::FileGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CsvExportRequest {
    pub file_name: String,
    pub description: String,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CsvExportResponse {
    pub id: i64,
}

/// Generator writing one CSV file from in-memory rows.
pub struct CsvExportGenerator {
    file_name: String,
    description: String,
    rows: Vec<Vec<String>>,
}

impl CsvExportGenerator {
    pub fn new(file_name: String, description: String, rows: Vec<Vec<String>>) -> Self {
        Self {
            file_name,
            description,
            rows,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|cell| quote_csv_cell(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }
}

fn quote_csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[async_trait]
impl FileGenerator for CsvExportGenerator {
    async fn generate(&self) -> io::Result<PathBuf> {
        // A flat uuid-named file in the shared temp dir: deleting the
        // produced file leaves no parent directory behind.
        let safe_name = Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .unwrap_or("export.csv");
        let path = std::env::temp_dir().join(format!("filegen-{}-{}", Uuid::new_v4(), safe_name));
        tokio::fs::write(&path, self.render()).await?;
        Ok(path)
    }

    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn mime_type(&self) -> String {
        "text/csv".to_string()
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn has_multiple_files(&self) -> bool {
        false
    }

    fn is_zippable(&self) -> bool {
        false
    }
}

#[tracing::instrument(skip(state, request), fields(user_id = user.user_id, operation = "submit_csv_export"))]
pub async fn submit_csv_export(
    user: AdminUser,
    State(state): State<AppState>,
    Json(request): Json<CsvExportRequest>,
) -> Result<(StatusCode, Json<CsvExportResponse>), HttpAppError> {
    if request.file_name.trim().is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "file_name must not be empty".to_string(),
        )));
    }

    let generator = Arc::new(CsvExportGenerator::new(
        request.file_name,
        request.description,
        request.rows,
    ));
    let id = state.generation.submit(generator, user.user_id).await?;

    Ok((StatusCode::ACCEPTED, Json(CsvExportResponse { id })))
}
