//! Extraction of class blocks from recognized grid text.
//!
//! Each line goes through three steps:
//! - `line::classify` keeps only lines that start with a time range
//! - `row::weekday_cells` cuts the rest of the line into weekday cells
//! - `code::extract_code` reduces each cell to a subject code
//!
//! Noise (headers, placeholders, cells without letters) is dropped silently.
//! A row whose time range does not parse is skipped and reported.

pub mod code;
pub mod line;
pub mod row;

use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::GradeCalResult;
use crate::session::Block;
use crate::time_range::TimeRange;

/// A schedule row that was recognized but could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the recognized text.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Outcome of parsing one recognized text blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub blocks: Vec<Block>,
    /// Lines classified as schedule rows, including skipped ones.
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Parser for one grid layout.
#[derive(Debug, Clone)]
pub struct GridParser {
    config: GridConfig,
}

impl GridParser {
    pub fn new(config: GridConfig) -> GradeCalResult<Self> {
        config.validate()?;
        Ok(GridParser { config })
    }

    /// Parse a single line.
    ///
    /// `None` when the line is not a schedule row, an error when it is one
    /// but its time range is unusable.
    pub fn parse_row(&self, line: &str) -> Option<GradeCalResult<Vec<Block>>> {
        let row = line::classify(line)?;

        let range = match TimeRange::parse(row.time_token) {
            Ok(range) => range,
            Err(e) => return Some(Err(e)),
        };

        let blocks = row::weekday_cells(row.payload, &self.config)
            .into_iter()
            .filter_map(|(weekday, cell)| {
                let code = code::extract_code(cell, self.config.code_length)?;
                Some(Block {
                    weekday,
                    range,
                    code,
                })
            })
            .collect();

        Some(Ok(blocks))
    }

    /// Parse every line of a recognized text blob.
    pub fn parse(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for (index, line) in text.lines().enumerate() {
            let Some(result) = self.parse_row(line) else {
                continue;
            };
            report.rows += 1;

            match result {
                Ok(blocks) => {
                    debug!(line = index + 1, blocks = blocks.len(), "parsed schedule row");
                    report.blocks.extend(blocks);
                }
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping schedule row");
                    report.skipped.push(SkippedRow {
                        line_number: index + 1,
                        line: line.trim().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn mon_to_wed() -> GridParser {
        GridParser::new(GridConfig::with_columns(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
        ]))
        .unwrap()
    }

    #[test]
    fn placeholder_column_is_skipped() {
        let blocks = mon_to_wed()
            .parse_row("07:30 - 08:25   SOP   ---   SOP")
            .unwrap()
            .unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].weekday, Weekday::Mon);
        assert_eq!(blocks[0].code, "SOP");
        assert_eq!(blocks[1].weekday, Weekday::Wed);
        assert_eq!(blocks[1].code, "SOP");
        assert_eq!(blocks[0].range, TimeRange::parse("07:30-08:25").unwrap());
    }

    #[test]
    fn non_row_line_is_none() {
        assert!(mon_to_wed().parse_row("Horario  Seg  Ter  Qua").is_none());
    }

    #[test]
    fn cells_without_letters_are_dropped() {
        let blocks = mon_to_wed()
            .parse_row("07:30-08:25  1290  MAT-2  ..")
            .unwrap()
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].weekday, Weekday::Tue);
        assert_eq!(blocks[0].code, "MAT");
    }

    #[test]
    fn default_grid_maps_first_column_to_sunday() {
        let parser = GridParser::new(GridConfig::default()).unwrap();
        let blocks = parser
            .parse_row("07:30-08:25  EF  SOP  ---")
            .unwrap()
            .unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].weekday, Weekday::Sun);
        assert_eq!(blocks[0].code, "EF");
        assert_eq!(blocks[1].weekday, Weekday::Mon);
        assert_eq!(blocks[1].code, "SOP");
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(GridParser::new(GridConfig::with_columns(vec![])).is_err());
    }

    #[test]
    fn parse_reports_rows_and_skips() {
        let text = "\
HORARIO 2024/1
Horario        Seg      Ter      Qua

07:30 - 08:25   SOP   ---   SOP
08:25 - 09:20   SOP   MAT   ---
09:40 - 09:20   FIS   FIS   FIS
10:35 \u{2013} 11:30   ---   ---   ---
";
        let report = mon_to_wed().parse(text);

        assert_eq!(report.rows, 4);
        assert_eq!(report.blocks.len(), 4);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 6);
        assert!(report.skipped[0].line.starts_with("09:40"));
    }

    #[test]
    fn empty_text_gives_empty_report() {
        assert_eq!(mon_to_wed().parse(""), ParseReport::default());
    }
}
