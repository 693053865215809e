//! Dataset editing API
//!
//! The dataset is held in memory and mirrored to the snapshot store
//! after every mutation. A failed snapshot write is logged and the
//! request still succeeds; the in-memory dataset is the source of truth
//! for the session.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use tsaw_common::model::{Dataset, InspectionRow, RowField};
use tsaw_common::store::{apply_update, UpdateValue};

use crate::AppState;

/// Dataset response shape shared by the read and mutation endpoints
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub total_rows: usize,
    pub rows: Vec<InspectionRow>,
}

impl DatasetResponse {
    fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            total_rows: dataset.len(),
            rows: dataset.clone(),
        }
    }
}

/// Body of a field update. `field` must name a mutable row field;
/// unknown names fail deserialization and surface as HTTP 400.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: u32,
    pub field: RowField,
    pub value: UpdateValue,
}

/// GET /api/dataset
///
/// Returns the current in-memory dataset.
pub async fn get_dataset(State(state): State<AppState>) -> Result<Json<DatasetResponse>, DatasetError> {
    let dataset = state
        .dataset
        .read()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;

    Ok(Json(DatasetResponse::from_dataset(&dataset)))
}

/// POST /api/dataset/update
///
/// Replaces one row's one field. Unknown row ids are a no-op, not an
/// error. Score values pass through the normalizer before being stored.
pub async fn update_dataset(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<DatasetResponse>, DatasetError> {
    let mut dataset = state
        .dataset
        .write()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;

    *dataset = apply_update(&dataset, request.id, request.field, &request.value);

    if let Err(e) = state.store.save(&dataset) {
        warn!(error = %e, "Failed to persist dataset snapshot");
    }

    Ok(Json(DatasetResponse::from_dataset(&dataset)))
}

/// POST /api/dataset/reset
///
/// Discards the persisted snapshot and replaces the dataset with a fresh
/// copy of the bundled default.
pub async fn reset_dataset(
    State(state): State<AppState>,
) -> Result<Json<DatasetResponse>, DatasetError> {
    let fresh = state
        .store
        .reset()
        .map_err(|e| DatasetError::Internal(e.to_string()))?;

    let mut dataset = state
        .dataset
        .write()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;
    *dataset = fresh;

    Ok(Json(DatasetResponse::from_dataset(&dataset)))
}

/// Dataset API errors
#[derive(Debug)]
pub enum DatasetError {
    Internal(String),
}

impl IntoResponse for DatasetError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DatasetError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
