//! ICS export of event payloads.

use icalendar::{Calendar, Component, EventLike, Property};

use crate::error::GradeCalResult;
use crate::event::{EventPayload, EventTime};

/// Generate one VCALENDAR holding a VEVENT per payload.
pub fn generate_ics(name: &str, events: &[EventPayload]) -> GradeCalResult<String> {
    let mut cal = Calendar::new();
    cal.name(name);

    if let Some(first) = events.first() {
        cal.timezone(first.start.tzid.as_str());
    }

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.summary);
        ics_event.description(&event.description);
        ics_event.location(&event.location);

        add_datetime_property(&mut ics_event, "DTSTART", &event.start);
        add_datetime_property(&mut ics_event, "DTEND", &event.end);

        cal.push(ics_event.done());
    }

    Ok(strip_ics_bloat(&cal.done().to_string()))
}

/// Replace the icalendar crate's PRODID and drop the default CALSCALE.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:GRADECAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    let mut prop = Property::new(name, time.datetime.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", &time.tzid);
    ics_event.append_property(prop);
}
