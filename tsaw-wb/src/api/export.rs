//! CSV export endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use tsaw_common::checklist::checklist_projection;
use tsaw_common::csv::dataset_to_csv;
use tsaw_common::model::InspectionRow;

use crate::api::dataset::DatasetError;
use crate::AppState;

/// GET /api/export/csv
///
/// Serializes the current checklist projection as CSV and serves it as a
/// file download.
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, DatasetError> {
    let dataset = state
        .dataset
        .read()
        .map_err(|_| DatasetError::Internal("dataset lock poisoned".to_string()))?;

    let rows: Vec<InspectionRow> = checklist_projection(&dataset)
        .into_iter()
        .map(|entry| entry.row)
        .collect();

    let csv = dataset_to_csv(&rows);

    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/csv; charset=utf-8"),
            (
                "content-disposition",
                "attachment; filename=\"implementation-checklist.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
