//! Grid and event configuration.
//!
//! These values are passed into `GridParser` and `EventTemplate` at
//! construction time, so several grids (or timezones) can be processed in
//! the same run without sharing state.

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{GradeCalError, GradeCalResult};

static DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
static DEFAULT_LOCATION: &str = "IFSC";
static DEFAULT_DESCRIPTION_PREFIX: &str = "Aula";
const DEFAULT_CODE_LENGTH: usize = 3;

/// How the payload of a schedule row is cut into weekday cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSplit {
    /// Cells are separated by runs of two or more whitespace characters.
    #[default]
    Whitespace,
    /// Cells are separated by dash-family glyphs.
    Separator,
}

/// Layout of the source grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Weekday of each column, left to right.
    pub columns: Vec<Weekday>,
    pub split: ColumnSplit,
    /// Cell values meaning "no class". Runs of three or more dashes always are.
    pub placeholders: Vec<String>,
    /// Length subject codes are truncated to.
    pub code_length: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            columns: vec![
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ],
            split: ColumnSplit::default(),
            placeholders: vec!["---".to_string()],
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl GridConfig {
    /// Grid config with the given column order and default everything else.
    pub fn with_columns(columns: Vec<Weekday>) -> Self {
        GridConfig {
            columns,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GradeCalResult<()> {
        if self.columns.is_empty() {
            return Err(GradeCalError::Config(
                "grid.columns must name at least one weekday".into(),
            ));
        }

        for (i, day) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(day) {
                return Err(GradeCalError::Config(format!(
                    "grid.columns lists {day} more than once"
                )));
            }
        }

        if self.code_length == 0 {
            return Err(GradeCalError::Config(
                "grid.code_length must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// How occurrences become calendar events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// IANA timezone the grid's wall-clock times are read in.
    pub timezone: String,
    pub location: String,
    /// Prepended to the subject code in the event description.
    pub description_prefix: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        EventConfig {
            timezone: DEFAULT_TIMEZONE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }
}

impl EventConfig {
    pub fn tz(&self) -> GradeCalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| GradeCalError::UnknownTimezone(self.timezone.clone()))
    }
}
