//! Scholarship records and the catalog they are loaded into.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{ScholarError, ScholarResult};

/// A single scholarship: name, due date and summary text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub name: String,
    pub due_date: NaiveDate,
    pub summary: String,
}

impl ScholarshipRecord {
    pub fn new(name: impl Into<String>, due_date: NaiveDate, summary: impl Into<String>) -> Self {
        ScholarshipRecord {
            name: name.into(),
            due_date,
            summary: summary.into(),
        }
    }

    /// Text shown in a calendar cell: name and summary on separate lines.
    pub fn event_text(&self) -> String {
        format!("{}\n{}", self.name, self.summary)
    }
}

impl fmt::Display for ScholarshipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (due {})", self.name, self.due_date)
    }
}

/// On-disk layout of a dataset file: `[[scholarships]]` tables in TOML.
#[derive(Deserialize)]
struct DatasetFile {
    #[serde(default)]
    scholarships: Vec<ScholarshipRecord>,
}

/// The immutable list of scholarships loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ScholarshipRecord>,
}

const BUILTIN: &[(&str, (i32, u32, u32), &str)] = &[
    (
        "Kuru Footsteps to Your Future Scholarship",
        (2024, 12, 20),
        "Amount: $1,000. Deadline: December 20, 2024.",
    ),
    (
        "Alert1 Students for Seniors Scholarship",
        (2025, 1, 10),
        "Amount: $500. Deadline: January 10, 2025.",
    ),
    (
        "Blankstyle Scholarship Opportunity #1",
        (2024, 12, 31),
        "Amount: $1,000. Deadline: December 31, 2024.",
    ),
    (
        "Innovation In Education Scholarship",
        (2024, 10, 15),
        "Amount: $500 each month. Deadline: 15th of each month.",
    ),
    (
        "The Bert & Phyllis Lamb Prize in Political Science",
        (2025, 2, 14),
        "This prize is awarded for excellence in Political Science. Deadline: February 14, 2025.",
    ),
    (
        "New Beginnings Immigrant Scholarship",
        (2024, 10, 18),
        "Supports immigrant students. Deadline: October 18, 2024.",
    ),
];

impl Catalog {
    pub fn new(records: Vec<ScholarshipRecord>) -> Self {
        Catalog { records }
    }

    /// The hardcoded scholarship list shipped with the application.
    pub fn builtin() -> Self {
        let records = BUILTIN
            .iter()
            .filter_map(|(name, (y, m, d), summary)| {
                NaiveDate::from_ymd_opt(*y, *m, *d).map(|due| ScholarshipRecord::new(*name, due, *summary))
            })
            .collect();

        Catalog { records }
    }

    /// Load a dataset file. `.json` files hold a plain array of records,
    /// anything else is parsed as TOML with `[[scholarships]]` entries.
    pub fn from_path(path: &Path) -> ScholarResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let records = if is_json {
            serde_json::from_str::<Vec<ScholarshipRecord>>(&content)
                .map_err(|e| ScholarError::Dataset(format!("{}: {}", path.display(), e)))?
        } else {
            toml::from_str::<DatasetFile>(&content)
                .map_err(|e| ScholarError::Dataset(format!("{}: {}", path.display(), e)))?
                .scholarships
        };

        log::debug!("Loaded {} scholarships from {}", records.len(), path.display());

        Ok(Catalog { records })
    }

    /// Load from `path` if given, otherwise fall back to the built-in list.
    pub fn load(path: Option<&Path>) -> ScholarResult<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn records(&self) -> &[ScholarshipRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records whose due date falls within `range`, in catalog order.
    pub fn in_range(&self, range: &DateRange) -> Vec<&ScholarshipRecord> {
        self.records
            .iter()
            .filter(|r| range.contains(r.due_date))
            .collect()
    }
}
