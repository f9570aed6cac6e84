//! ICS file generation.

use icalendar::{Calendar, Component, Property, ValueType};

use crate::error::{ScholarError, ScholarResult};
use crate::scholarship::ScholarshipRecord;

/// Deterministic UID so repeated exports update rather than duplicate events.
pub fn event_uid(record: &ScholarshipRecord) -> String {
    format!(
        "{}-{}@scholarship-finder",
        slug::slugify(&record.name),
        record.due_date.format("%Y%m%d")
    )
}

/// Generate .ics content with one all-day event per scholarship deadline
pub fn generate_ics<'a, I>(records: I) -> ScholarResult<String>
where
    I: IntoIterator<Item = &'a ScholarshipRecord>,
{
    let mut cal = Calendar::new();
    cal.name("Scholarship Deadlines");

    for record in records {
        let end = record.due_date.succ_opt().ok_or_else(|| {
            ScholarError::IcsGenerate(format!("no day after {} for '{}'", record.due_date, record.name))
        })?;

        let mut event = icalendar::Event::new();
        event.uid(&event_uid(record));
        event.summary(&record.name);
        event.description(&record.summary);
        event.add_property("DTSTAMP", chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string());

        let mut start = Property::new("DTSTART", record.due_date.format("%Y%m%d").to_string());
        start.append_parameter(ValueType::Date);
        event.append_property(start);

        let mut finish = Property::new("DTEND", end.format("%Y%m%d").to_string());
        finish.append_parameter(ValueType::Date);
        event.append_property(finish);

        cal.push(event.done());
    }

    Ok(strip_ics_bloat(&cal.done().to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:SCHOLARSHIP-FINDER\r\n");
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
