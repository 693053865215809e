//! Implementation-checklist projection
//!
//! The checklist is derived from the dataset, never stored: every row not
//! yet at the target score, augmented with its computed severity and
//! re-ordered for implementation planning.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Dataset, InspectionRow, TARGET_SCORE};
use crate::score::severity;

/// One checklist entry: an inspection row plus its derived urgency.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistRow {
    #[serde(flatten)]
    pub row: InspectionRow,
    pub severity: u8,
}

/// Parse a priority string as a finite number, treating anything else as
/// unset.
fn parse_priority(priority: &str) -> Option<f64> {
    priority.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Project the dataset onto the implementation checklist.
///
/// Rows at the target score are excluded; "N/A" and unset scores stay in.
/// Ordering: ascending numeric priority with unset priorities last, ties
/// broken by descending severity, remaining ties by original row order.
pub fn checklist_projection(dataset: &Dataset) -> Vec<ChecklistRow> {
    let mut rows: Vec<ChecklistRow> = dataset
        .iter()
        .filter(|row| row.score != TARGET_SCORE)
        .map(|row| ChecklistRow {
            severity: severity(&row.score),
            row: row.clone(),
        })
        .collect();

    rows.sort_by(|a, b| {
        let pa = parse_priority(&a.row.priority);
        let pb = parse_priority(&b.row.priority);
        match (pa, pb) {
            (Some(x), Some(y)) => x
                .partial_cmp(&y)
                .unwrap_or(Ordering::Equal)
                .then(b.severity.cmp(&a.severity)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.severity.cmp(&a.severity),
        }
    });

    rows
}

/// Assign priorities "1".."N" across the checklist by descending severity.
///
/// The highest-severity row among the checklist projection gets priority
/// "1"; ties keep their original relative order. Rows already at the
/// target score are left untouched. Returns the updated dataset.
pub fn auto_prioritize(dataset: &Dataset) -> Dataset {
    let mut ranked: Vec<(usize, u8)> = dataset
        .iter()
        .enumerate()
        .filter(|(_, row)| row.score != TARGET_SCORE)
        .map(|(idx, row)| (idx, severity(&row.score)))
        .collect();

    // Stable sort: equal severities keep original dataset order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut updated = dataset.clone();
    for (rank, (idx, _)) in ranked.iter().enumerate() {
        updated[*idx].priority = (rank + 1).to_string();
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, score: &str, priority: &str) -> InspectionRow {
        InspectionRow {
            id,
            inspection_element: format!("element {}", id),
            issue_category: String::new(),
            issue_sub_category: String::new(),
            skillset: String::new(),
            score: score.to_string(),
            priority: priority.to_string(),
            analysis: String::new(),
            recommendations: String::new(),
            implementer: String::new(),
            check: false,
        }
    }

    #[test]
    fn projection_excludes_only_target_score_rows() {
        let dataset = vec![
            row(1, "9", ""),
            row(2, "3", ""),
            row(3, "N/A", ""),
            row(4, "", ""),
            row(5, "9", ""),
        ];

        let checklist = checklist_projection(&dataset);
        let ids: Vec<u32> = checklist.iter().map(|c| c.row.id).collect();

        assert!(!ids.contains(&1));
        assert!(!ids.contains(&5));
        assert_eq!(checklist.len(), 3);
    }

    #[test]
    fn projection_orders_by_priority_then_severity() {
        let dataset = vec![
            row(1, "2", "3"),  // priority 3
            row(2, "1", ""),   // unset priority, severity 9
            row(3, "4", "1"),  // priority 1
            row(4, "5", ""),   // unset priority, severity 5
            row(5, "3", "2"),  // priority 2
        ];

        let checklist = checklist_projection(&dataset);
        let ids: Vec<u32> = checklist.iter().map(|c| c.row.id).collect();

        // Numbered priorities first in ascending order, unset last ordered
        // by severity descending
        assert_eq!(ids, vec![3, 5, 1, 2, 4]);
    }

    #[test]
    fn equal_priorities_break_ties_by_severity() {
        let dataset = vec![
            row(1, "6", "1"), // severity 4
            row(2, "2", "1"), // severity 8
        ];

        let checklist = checklist_projection(&dataset);
        let ids: Vec<u32> = checklist.iter().map(|c| c.row.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn fractional_priorities_sort_numerically() {
        let dataset = vec![row(1, "3", "2.5"), row(2, "3", "2.25"), row(3, "3", "10")];

        let checklist = checklist_projection(&dataset);
        let ids: Vec<u32> = checklist.iter().map(|c| c.row.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn auto_prioritize_ranks_highest_severity_first() {
        let dataset = vec![
            row(1, "5", ""), // severity 5
            row(2, "1", ""), // severity 9, most urgent
            row(3, "9", ""), // excluded
            row(4, "8", ""), // severity 2
        ];

        let updated = auto_prioritize(&dataset);

        assert_eq!(updated[1].priority, "1");
        assert_eq!(updated[0].priority, "2");
        assert_eq!(updated[3].priority, "3");
        // Target-score row untouched
        assert_eq!(updated[2].priority, "");
    }

    #[test]
    fn auto_prioritize_ties_keep_original_order() {
        let dataset = vec![row(1, "4", ""), row(2, "4", ""), row(3, "4", "")];

        let updated = auto_prioritize(&dataset);

        assert_eq!(updated[0].priority, "1");
        assert_eq!(updated[1].priority, "2");
        assert_eq!(updated[2].priority, "3");
    }

    #[test]
    fn auto_prioritize_counts_unset_scores() {
        // Severity 0 rows still participate, they just rank last
        let dataset = vec![row(1, "", ""), row(2, "2", "")];

        let updated = auto_prioritize(&dataset);

        assert_eq!(updated[1].priority, "1");
        assert_eq!(updated[0].priority, "2");
    }
}
