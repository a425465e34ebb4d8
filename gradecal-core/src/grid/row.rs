//! Cutting a row payload into weekday cells.

use std::sync::LazyLock;

use chrono::Weekday;
use regex::Regex;

use crate::config::{ColumnSplit, GridConfig};
use crate::time_range::is_dash;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Split a payload into raw cells, in column order.
pub fn split_cells(payload: &str, split: ColumnSplit) -> Vec<&str> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Vec::new();
    }

    match split {
        ColumnSplit::Whitespace => WHITESPACE_RUN.split(payload).map(str::trim).collect(),
        ColumnSplit::Separator => payload
            .split(is_dash)
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect(),
    }
}

/// Whether a cell stands for an empty slot in the grid.
pub fn is_placeholder(cell: &str, placeholders: &[String]) -> bool {
    let cell = cell.trim();
    if cell.is_empty() {
        return true;
    }
    if cell.chars().count() >= 3 && cell.chars().all(is_dash) {
        return true;
    }
    placeholders.iter().any(|p| p == cell)
}

/// Map the cells of a payload onto the configured weekday columns.
///
/// Placeholder and empty cells keep their column but yield nothing; cells
/// past the last configured column are dropped.
pub fn weekday_cells<'a>(payload: &'a str, config: &GridConfig) -> Vec<(Weekday, &'a str)> {
    split_cells(payload, config.split)
        .into_iter()
        .zip(config.columns.iter().copied())
        .filter(|(cell, _)| !is_placeholder(cell, &config.placeholders))
        .map(|(cell, weekday)| (weekday, cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders() -> Vec<String> {
        vec!["---".to_string()]
    }

    #[test]
    fn whitespace_split_keeps_single_spaces_inside_cells() {
        let cells = split_cells("  SOP 101   ---   MAT II  ", ColumnSplit::Whitespace);
        assert_eq!(cells, vec!["SOP 101", "---", "MAT II"]);
    }

    #[test]
    fn whitespace_split_accepts_tabs() {
        let cells = split_cells("SOP\t\tMAT", ColumnSplit::Whitespace);
        assert_eq!(cells, vec!["SOP", "MAT"]);
    }

    #[test]
    fn separator_split_drops_empty_pieces() {
        let cells = split_cells("SOP - MAT \u{2014} --- FIS", ColumnSplit::Separator);
        assert_eq!(cells, vec!["SOP", "MAT", "FIS"]);
    }

    #[test]
    fn empty_payload_has_no_cells() {
        assert!(split_cells("   ", ColumnSplit::Whitespace).is_empty());
        assert!(split_cells("", ColumnSplit::Separator).is_empty());
    }

    #[test]
    fn placeholder_tokens() {
        let tokens = placeholders();
        assert!(is_placeholder("---", &tokens));
        assert!(is_placeholder(" \u{2014}\u{2014}\u{2014}\u{2014} ", &tokens));
        assert!(is_placeholder("", &tokens));
        assert!(!is_placeholder("--", &tokens));
        assert!(!is_placeholder("SOP", &tokens));
        assert!(is_placeholder("LIVRE", &["LIVRE".to_string()]));
    }

    #[test]
    fn placeholder_column_still_counts_as_a_column() {
        let config = GridConfig::with_columns(vec![Weekday::Mon, Weekday::Tue, Weekday::Wed]);
        let cells = weekday_cells("   SOP   ---   SOP", &config);
        assert_eq!(cells, vec![(Weekday::Mon, "SOP"), (Weekday::Wed, "SOP")]);
    }

    #[test]
    fn cells_beyond_configured_columns_are_ignored() {
        let config = GridConfig::with_columns(vec![Weekday::Mon, Weekday::Tue]);
        let cells = weekday_cells("SOP  MAT  FIS  QUI", &config);
        assert_eq!(cells, vec![(Weekday::Mon, "SOP"), (Weekday::Tue, "MAT")]);
    }
}
