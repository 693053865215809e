//! Implementation-checklist API
//!
//! The checklist is a pure projection of the dataset; only
//! auto-prioritization writes anything back.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use tsaw_common::checklist::{auto_prioritize, checklist_projection, ChecklistRow};

use crate::api::dataset::DatasetError;
use crate::AppState;

/// Checklist response
#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub total_rows: usize,
    pub rows: Vec<ChecklistRow>,
}

/// GET /api/checklist
///
/// Rows not yet at the target score, augmented with severity, ordered by
/// priority then severity.
pub async fn get_checklist(
    State(state): State<AppState>,
) -> Result<Json<ChecklistResponse>, DatasetError> {
    let dataset = state
        .dataset
        .read()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;

    let rows = checklist_projection(&dataset);
    Ok(Json(ChecklistResponse {
        total_rows: rows.len(),
        rows,
    }))
}

/// POST /api/checklist/prioritize
///
/// Ranks checklist rows by descending severity and writes priorities
/// "1".."N" back into the dataset. Returns the re-projected checklist.
pub async fn prioritize_checklist(
    State(state): State<AppState>,
) -> Result<Json<ChecklistResponse>, DatasetError> {
    let mut dataset = state
        .dataset
        .write()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;

    *dataset = auto_prioritize(&dataset);

    if let Err(e) = state.store.save(&dataset) {
        warn!(error = %e, "Failed to persist dataset snapshot");
    }

    let rows = checklist_projection(&dataset);
    Ok(Json(ChecklistResponse {
        total_rows: rows.len(),
        rows,
    }))
}
