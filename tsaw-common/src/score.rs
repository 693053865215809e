//! Score normalization and severity estimation
//!
//! Scores are kept as strings so the unset ("") and not-applicable ("N/A")
//! states survive serialization unchanged. Normalization is a total
//! function: every input maps to a member of {"", "N/A", "1".."9"}.

/// Normalize an arbitrary score input.
///
/// - case-insensitive "n/a" becomes "N/A"
/// - empty or whitespace-only input becomes ""
/// - anything else is parsed as a number, rounded to the nearest integer
///   and clamped to [1,9]; unparseable or non-finite input becomes ""
pub fn normalize_score(input: &str) -> String {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.eq_ignore_ascii_case("n/a") {
        return "N/A".to_string();
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let clamped = value.round().clamp(1.0, 9.0) as i64;
            clamped.to_string()
        }
        _ => String::new(),
    }
}

/// Derived urgency weight, the inverse of score.
///
/// Unset and not-applicable scores carry no urgency. A score of 1 is the
/// most urgent (severity 9), a score of 9 the least (severity 1).
pub fn severity(score: &str) -> u8 {
    match score.parse::<u8>() {
        Ok(n) if (1..=9).contains(&n) => 10 - n,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_to_range() {
        assert_eq!(normalize_score("15"), "9");
        assert_eq!(normalize_score("0"), "1");
        assert_eq!(normalize_score("-3"), "1");
        assert_eq!(normalize_score("5"), "5");
    }

    #[test]
    fn normalize_rounds_to_nearest() {
        assert_eq!(normalize_score("4.4"), "4");
        assert_eq!(normalize_score("4.5"), "5");
        assert_eq!(normalize_score("8.9"), "9");
    }

    #[test]
    fn normalize_handles_not_applicable() {
        assert_eq!(normalize_score("n/a"), "N/A");
        assert_eq!(normalize_score("N/A"), "N/A");
        assert_eq!(normalize_score("N/a"), "N/A");
        assert_eq!(normalize_score("  n/a  "), "N/A");
    }

    #[test]
    fn normalize_maps_garbage_to_empty() {
        assert_eq!(normalize_score(""), "");
        assert_eq!(normalize_score("   "), "");
        assert_eq!(normalize_score("abc"), "");
        assert_eq!(normalize_score("NaN"), "");
        assert_eq!(normalize_score("inf"), "");
    }

    #[test]
    fn normalize_output_always_in_closed_set() {
        let inputs = [
            "", " ", "n/a", "0", "1", "9", "10", "-1", "4.6", "1e9", "abc", "3x", "NaN", "-inf",
        ];
        for input in inputs {
            let out = normalize_score(input);
            let valid = out.is_empty()
                || out == "N/A"
                || out.parse::<u8>().map(|n| (1..=9).contains(&n)).unwrap_or(false);
            assert!(valid, "normalize_score({:?}) produced {:?}", input, out);
        }
    }

    #[test]
    fn severity_is_inverse_of_score() {
        assert_eq!(severity("9"), 1);
        assert_eq!(severity("1"), 9);
        assert_eq!(severity("5"), 5);
    }

    #[test]
    fn severity_of_unset_scores_is_zero() {
        assert_eq!(severity(""), 0);
        assert_eq!(severity("N/A"), 0);
        assert_eq!(severity("garbage"), 0);
    }
}
