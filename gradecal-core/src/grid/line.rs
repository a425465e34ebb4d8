//! Row detection: a schedule row starts with `HH:MM<dash>HH:MM`.

use std::sync::LazyLock;

use regex::Regex;

static ROW_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[0-9]{2}:[0-9]{2}\\s*[-\u{2013}\u{2014}]\\s*[0-9]{2}:[0-9]{2}")
        .expect("row pattern is valid")
});

/// A line recognized as a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMatch<'a> {
    /// The leading time-range token, e.g. `"07:30 - 08:25"`.
    pub time_token: &'a str,
    /// Everything after the time range: the row's cells.
    pub payload: &'a str,
}

/// Match the leading time range of `line`. Titles, headers, blank lines and
/// lines with a time range anywhere but the start yield `None`.
pub fn classify(line: &str) -> Option<RowMatch<'_>> {
    let line = line.trim();
    let found = ROW_START.find(line)?;

    Some(RowMatch {
        time_token: found.as_str(),
        payload: &line[found.end()..],
    })
}
