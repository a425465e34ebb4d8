//! Provider-neutral event payloads.
//!
//! An `EventTemplate` turns each occurrence into the payload handed to a
//! calendar provider or written to an ICS file. It never talks to a calendar
//! itself.

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EventConfig;
use crate::error::{GradeCalError, GradeCalResult};
use crate::recurrence::Occurrence;

/// Wall-clock time in a named IANA timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    pub datetime: NaiveDateTime,
    pub tzid: String,
}

/// A calendar event ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Maps occurrences to payloads for one timezone, location and title style.
#[derive(Debug, Clone)]
pub struct EventTemplate {
    tz: Tz,
    location: String,
    description_prefix: String,
}

impl EventTemplate {
    pub fn new(config: &EventConfig) -> GradeCalResult<Self> {
        Ok(EventTemplate {
            tz: config.tz()?,
            location: config.location.clone(),
            description_prefix: config.description_prefix.clone(),
        })
    }

    pub fn tzid(&self) -> &str {
        self.tz.name()
    }

    fn event_time(&self, datetime: NaiveDateTime) -> GradeCalResult<EventTime> {
        if self.tz.from_local_datetime(&datetime).earliest().is_none() {
            return Err(GradeCalError::NonexistentLocalTime {
                datetime: datetime.format("%Y-%m-%d %H:%M").to_string(),
                tzid: self.tzid().to_string(),
            });
        }

        Ok(EventTime {
            datetime,
            tzid: self.tzid().to_string(),
        })
    }

    fn description(&self, code: &str) -> String {
        if self.description_prefix.is_empty() {
            code.to_string()
        } else {
            format!("{} {}", self.description_prefix, code)
        }
    }

    /// Build the payload for one occurrence.
    ///
    /// Fails with `NonexistentLocalTime` when either end falls into a
    /// daylight-saving gap of the configured timezone.
    pub fn materialize(&self, occurrence: &Occurrence<'_>) -> GradeCalResult<EventPayload> {
        let start = self.event_time(occurrence.date.and_time(occurrence.range.start))?;
        let end = self.event_time(occurrence.date.and_time(occurrence.range.end))?;

        Ok(EventPayload {
            uid: format!("{}@gradecal", Uuid::new_v4()),
            summary: occurrence.code.to_string(),
            description: self.description(occurrence.code),
            location: self.location.clone(),
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_range::TimeRange;
    use chrono::NaiveDate;

    fn occurrence(date: NaiveDate, range: &str) -> Occurrence<'static> {
        Occurrence {
            date,
            range: TimeRange::parse(range).unwrap(),
            code: "SOP",
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn payload_uses_code_location_and_zone() {
        let template = EventTemplate::new(&EventConfig::default()).unwrap();
        let payload = template
            .materialize(&occurrence(ymd(2024, 3, 4), "07:30-09:20"))
            .unwrap();

        assert_eq!(payload.summary, "SOP");
        assert_eq!(payload.description, "Aula SOP");
        assert_eq!(payload.location, "IFSC");
        assert_eq!(payload.start.tzid, "America/Sao_Paulo");
        assert_eq!(
            payload.start.datetime,
            ymd(2024, 3, 4).and_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            payload.end.datetime,
            ymd(2024, 3, 4).and_hms_opt(9, 20, 0).unwrap()
        );
        assert!(payload.uid.ends_with("@gradecal"));
    }

    #[test]
    fn empty_prefix_uses_bare_code() {
        let config = EventConfig {
            description_prefix: String::new(),
            ..EventConfig::default()
        };
        let template = EventTemplate::new(&config).unwrap();
        let payload = template
            .materialize(&occurrence(ymd(2024, 3, 4), "07:30-09:20"))
            .unwrap();
        assert_eq!(payload.description, "SOP");
    }

    #[test]
    fn dst_gap_is_rejected() {
        // Clocks in New York jump from 02:00 to 03:00 on 2024-03-10.
        let config = EventConfig {
            timezone: "America/New_York".to_string(),
            ..EventConfig::default()
        };
        let template = EventTemplate::new(&config).unwrap();
        let result = template.materialize(&occurrence(ymd(2024, 3, 10), "02:15-03:30"));

        assert!(matches!(
            result,
            Err(GradeCalError::NonexistentLocalTime { .. })
        ));
    }

    #[test]
    fn dst_overlap_is_accepted() {
        // 01:30 happens twice in New York on 2024-11-03.
        let config = EventConfig {
            timezone: "America/New_York".to_string(),
            ..EventConfig::default()
        };
        let template = EventTemplate::new(&config).unwrap();
        let payload = template
            .materialize(&occurrence(ymd(2024, 11, 3), "01:30-02:30"))
            .unwrap();

        assert_eq!(
            payload.start.datetime,
            ymd(2024, 11, 3).and_hms_opt(1, 30, 0).unwrap()
        );
        assert_eq!(payload.start.tzid, "America/New_York");
    }

    #[test]
    fn unknown_timezone_fails_construction() {
        let config = EventConfig {
            timezone: "Nowhere/Special".to_string(),
            ..EventConfig::default()
        };
        assert!(EventTemplate::new(&config).is_err());
    }
}
