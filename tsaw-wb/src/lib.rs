//! tsaw-wb library - Technical SEO Audit Workbench service
//!
//! Owns the in-memory inspection dataset, persists it through the
//! snapshot store, and exposes the JSON API: dataset editing, the
//! implementation-checklist projection, CSV export, and the
//! recommendation proxy.

use std::sync::{Arc, RwLock};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tsaw_common::config::Config;
use tsaw_common::model::Dataset;
use tsaw_common::store::DatasetStore;

pub mod api;
pub mod gemini;

use gemini::GeminiClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Current dataset; mirrored to the snapshot store on every mutation
    pub dataset: Arc<RwLock<Dataset>>,
    /// Snapshot persistence
    pub store: Arc<DatasetStore>,
    /// Startup configuration
    pub config: Arc<Config>,
    /// Upstream client; `None` when no credential is configured
    pub gemini: Option<Arc<GeminiClient>>,
}

impl AppState {
    /// Create application state: load the dataset (snapshot or bundled
    /// default) and build the upstream client if a credential exists.
    pub fn new(store: DatasetStore, config: Config) -> anyhow::Result<Self> {
        let dataset = store.load();
        let gemini = GeminiClient::from_config(&config)?.map(Arc::new);

        Ok(Self {
            dataset: Arc::new(RwLock::new(dataset)),
            store: Arc::new(store),
            config: Arc::new(config),
            gemini,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/dataset", get(api::get_dataset))
        .route("/api/dataset/update", post(api::update_dataset))
        .route("/api/dataset/reset", post(api::reset_dataset))
        .route("/api/checklist", get(api::get_checklist))
        .route("/api/checklist/prioritize", post(api::prioritize_checklist))
        .route("/api/export/csv", get(api::export_csv))
        .route("/api/recommend", post(api::generate_recommendation))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
