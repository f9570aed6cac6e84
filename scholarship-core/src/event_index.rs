//! Date -> display text index used by the calendar view.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::scholarship::ScholarshipRecord;

/// What to do when two scholarships share a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The record later in iteration order replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Texts are joined with a blank line, in iteration order.
    Append,
}

/// Mapping from due date to the text shown on that calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIndex {
    events: BTreeMap<NaiveDate, String>,
}

impl EventIndex {
    pub fn new() -> Self {
        EventIndex::default()
    }

    /// Index `records` whose due date lies in `[start, end]` with last-write-wins on collisions.
    pub fn build<'a, I>(records: I, range: &DateRange) -> Self
    where
        I: IntoIterator<Item = &'a ScholarshipRecord>,
    {
        Self::build_with(records, range, CollisionPolicy::LastWriteWins)
    }

    pub fn build_with<'a, I>(records: I, range: &DateRange, policy: CollisionPolicy) -> Self
    where
        I: IntoIterator<Item = &'a ScholarshipRecord>,
    {
        let mut index = EventIndex::new();
        for record in records.into_iter().filter(|r| range.contains(r.due_date)) {
            index.insert(record.due_date, record.event_text(), policy);
        }
        index
    }

    pub fn insert(&mut self, date: NaiveDate, text: String, policy: CollisionPolicy) {
        match self.events.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert(text);
            }
            Entry::Occupied(mut slot) => match policy {
                CollisionPolicy::LastWriteWins => {
                    log::debug!("Replacing calendar entry on {}", date);
                    slot.insert(text);
                }
                CollisionPolicy::Append => {
                    let existing = slot.get_mut();
                    existing.push_str("\n\n");
                    existing.push_str(&text);
                }
            },
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.events.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.events.iter().map(|(d, t)| (*d, t.as_str()))
    }
}

/// Build the event index for `records` between `start` and `end` inclusive.
pub fn build_event_index(records: &[ScholarshipRecord], start: NaiveDate, end: NaiveDate) -> EventIndex {
    let range = DateRange {
        from: Some(start),
        to: Some(end),
    };
    EventIndex::build(records, &range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scholarship::Catalog;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, due: NaiveDate) -> ScholarshipRecord {
        ScholarshipRecord::new(name, due, format!("{} summary", name))
    }

    #[test]
    fn excludes_records_outside_range() {
        let records = vec![
            record("early", date(2024, 9, 30)),
            record("first-day", date(2024, 10, 1)),
            record("last-day", date(2024, 10, 31)),
            record("late", date(2024, 11, 1)),
        ];

        let index = build_event_index(&records, date(2024, 10, 1), date(2024, 10, 31));

        assert_eq!(index.len(), 2);
        assert!(index.get(date(2024, 9, 30)).is_none());
        assert!(index.get(date(2024, 11, 1)).is_none());
        assert_eq!(index.get(date(2024, 10, 1)), Some("first-day\nfirst-day summary"));
        assert_eq!(index.get(date(2024, 10, 31)), Some("last-day\nlast-day summary"));
    }

    #[test]
    fn same_day_collision_keeps_last_record() {
        let records = vec![record("A", date(2024, 12, 20)), record("B", date(2024, 12, 20))];

        let index = build_event_index(&records, date(2024, 1, 1), date(2025, 12, 31));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(date(2024, 12, 20)), Some("B\nB summary"));
    }

    #[test]
    fn append_policy_keeps_both_records() {
        let records = vec![record("A", date(2024, 12, 20)), record("B", date(2024, 12, 20))];

        let index = EventIndex::build_with(&records, &DateRange::all(), CollisionPolicy::Append);

        assert_eq!(
            index.get(date(2024, 12, 20)),
            Some("A\nA summary\n\nB\nB summary")
        );
    }

    #[test]
    fn builtin_catalog_indexes_every_due_date() {
        let catalog = Catalog::builtin();
        let index = EventIndex::build(catalog.records(), &DateRange::all());
        assert_eq!(index.len(), catalog.len());

        let dates: Vec<_> = index.iter().map(|(d, _)| d).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn collision_policy_parses_from_kebab_case() {
        let policy: CollisionPolicy = serde_json::from_str("\"append\"").unwrap();
        assert_eq!(policy, CollisionPolicy::Append);
        let policy: CollisionPolicy = serde_json::from_str("\"last-write-wins\"").unwrap();
        assert_eq!(policy, CollisionPolicy::LastWriteWins);
    }
}
