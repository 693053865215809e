//! CSV serialization of the inspection dataset
//!
//! Produces the fixed eleven-column export consumed by spreadsheet tools.
//! The TARGET SCORE column is the constant passing score for every row.

use crate::model::{InspectionRow, TARGET_SCORE};

/// Fixed header row for the CSV export.
pub const CSV_HEADER: &str = "X/√,INSPECTION ELEMENT,PRIORITY,ISSUE CATEGORY,ISSUE SUB-CATEGORY,SKILLSET,SCORE,TARGET SCORE,ANALYSIS,RECOMMENDATIONS,IMPLEMENTER";

/// Escape a single CSV field.
///
/// A field is wrapped in double quotes, with internal double quotes
/// doubled, only when it contains a comma, a double quote, or a newline.
/// Everything else is emitted verbatim.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render one row as a CSV line.
fn row_to_line(row: &InspectionRow) -> String {
    let fields = [
        if row.check { "TRUE" } else { "FALSE" },
        row.inspection_element.as_str(),
        row.priority.as_str(),
        row.issue_category.as_str(),
        row.issue_sub_category.as_str(),
        row.skillset.as_str(),
        row.score.as_str(),
        TARGET_SCORE,
        row.analysis.as_str(),
        row.recommendations.as_str(),
        row.implementer.as_str(),
    ];

    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize an ordered sequence of rows as CSV text, header first.
pub fn dataset_to_csv(rows: &[InspectionRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows.iter().map(row_to_line));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> InspectionRow {
        InspectionRow {
            id: 1,
            inspection_element: "Canonical tag coverage".to_string(),
            issue_category: "Indexation".to_string(),
            issue_sub_category: "Canonicalization".to_string(),
            skillset: "Developer".to_string(),
            score: "4".to_string(),
            priority: "2".to_string(),
            analysis: "Several templates emit relative canonicals".to_string(),
            recommendations: "".to_string(),
            implementer: "Web team".to_string(),
            check: false,
        }
    }

    #[test]
    fn plain_fields_are_emitted_verbatim() {
        assert_eq!(escape_field("no special chars"), "no special chars");
    }

    #[test]
    fn special_fields_are_quoted_and_doubled() {
        assert_eq!(escape_field("a,b\"c\nd"), "\"a,b\"\"c\nd\"");
        assert_eq!(escape_field("plain, comma"), "\"plain, comma\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn header_is_exact() {
        let csv = dataset_to_csv(&[]);
        assert_eq!(
            csv,
            "X/√,INSPECTION ELEMENT,PRIORITY,ISSUE CATEGORY,ISSUE SUB-CATEGORY,SKILLSET,SCORE,TARGET SCORE,ANALYSIS,RECOMMENDATIONS,IMPLEMENTER"
        );
    }

    #[test]
    fn row_renders_flag_and_target_score() {
        let mut row = sample_row();
        row.check = true;

        let csv = dataset_to_csv(&[row]);
        let line = csv.lines().nth(1).unwrap();

        assert!(line.starts_with("TRUE,"));
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[6], "4");
        assert_eq!(fields[7], "9");
    }

    #[test]
    fn one_line_per_row() {
        let rows = vec![sample_row(), sample_row(), sample_row()];
        let csv = dataset_to_csv(&rows);
        assert_eq!(csv.lines().count(), 4);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn analysis_with_embedded_newline_stays_in_one_field() {
        let mut row = sample_row();
        row.analysis = "line one\nline two, with comma".to_string();

        let csv = dataset_to_csv(&[row]);
        assert!(csv.contains("\"line one\nline two, with comma\""));
    }
}
