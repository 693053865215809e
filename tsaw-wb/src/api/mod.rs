//! HTTP API handlers for tsaw-wb

pub mod buildinfo;
pub mod checklist;
pub mod dataset;
pub mod export;
pub mod health;
pub mod recommend;

pub use buildinfo::get_build_info;
pub use checklist::{get_checklist, prioritize_checklist};
pub use dataset::{get_dataset, reset_dataset, update_dataset};
pub use export::export_csv;
pub use health::health_routes;
pub use recommend::generate_recommendation;
