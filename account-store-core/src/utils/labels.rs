//! Label string codec
//!
//! Bridges the free-text label input (`"prod; eu"`) and the structured
//! `labels` field of an account.

use crate::types::Label;

/// Separator accepted when parsing
const LABEL_DELIMITER: char = ';';
/// Separator emitted when formatting
const LABEL_JOINER: &str = "; ";

/// Parse a `;`-delimited label string
///
/// Segments are trimmed and empty ones dropped. Blank input yields no labels.
#[must_use]
pub fn parse_labels(input: &str) -> Vec<Label> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    input
        .split(LABEL_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(Label::from)
        .collect()
}

/// Format labels for display, joined with `"; "`
#[must_use]
pub fn format_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| label.text.as_str())
        .collect::<Vec<_>>()
        .join(LABEL_JOINER)
}

/// Canonical display form of a label string (parse then format)
#[must_use]
pub fn normalize_labels(input: &str) -> String {
    format_labels(&parse_labels(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(labels: &[Label]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn parse_trims_and_drops_empty_segments() {
        let labels = parse_labels(" a ; ;b;c ");
        assert_eq!(texts(&labels), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_blank_input_is_empty() {
        assert!(parse_labels("").is_empty());
        assert!(parse_labels("   ").is_empty());
        assert!(parse_labels("\t\n").is_empty());
    }

    #[test]
    fn parse_only_delimiters_is_empty() {
        assert!(parse_labels(";;; ;").is_empty());
    }

    #[test]
    fn parse_keeps_inner_whitespace_and_duplicates() {
        let labels = parse_labels("team a; team a;x");
        assert_eq!(texts(&labels), vec!["team a", "team a", "x"]);
    }

    #[test]
    fn format_joins_with_canonical_separator() {
        let labels = vec![Label::new("prod"), Label::new("eu")];
        assert_eq!(format_labels(&labels), "prod; eu");
    }

    #[test]
    fn format_empty_is_empty_string() {
        assert_eq!(format_labels(&[]), "");
    }

    #[test]
    fn format_then_parse_near_inverse() {
        assert_eq!(normalize_labels(" a ; ;b;c "), "a; b; c");
        assert_eq!(normalize_labels("prod;eu"), "prod; eu");
        assert_eq!(normalize_labels("single"), "single");
        assert_eq!(normalize_labels("  "), "");
    }

    #[test]
    fn normalized_form_is_stable() {
        let once = normalize_labels("x ;y;;  z");
        assert_eq!(normalize_labels(&once), once);
    }
}
