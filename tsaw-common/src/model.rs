//! Inspection dataset model
//!
//! One `InspectionRow` per audited technical-SEO check item. Field names
//! serialize as camelCase to match the snapshot and API wire format.

use serde::{Deserialize, Serialize};

/// Score value representing "passing". Rows already at target are excluded
/// from the implementation checklist and never sent upstream for a
/// recommendation.
pub const TARGET_SCORE: &str = "9";

/// One inspection item in the audit dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRow {
    /// Unique key, assigned at dataset load time, immutable.
    pub id: u32,
    pub inspection_element: String,
    pub issue_category: String,
    pub issue_sub_category: String,
    pub skillset: String,
    /// One of "", "N/A", "1".."9". Empty means unset. Always passes through
    /// the normalizer before being stored.
    #[serde(default)]
    pub score: String,
    /// Free-form numeric string used for ordering. Empty means unset.
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub implementer: String,
    /// Completion flag.
    #[serde(default)]
    pub check: bool,
}

/// Ordered sequence of inspection rows, unique by `id`.
pub type Dataset = Vec<InspectionRow>;

/// The user-mutable fields of an inspection row.
///
/// An update request names the field it writes; unknown field names fail
/// deserialization at the API boundary rather than being silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowField {
    InspectionElement,
    IssueCategory,
    IssueSubCategory,
    Skillset,
    Score,
    Priority,
    Analysis,
    Recommendations,
    Implementer,
    Check,
}
