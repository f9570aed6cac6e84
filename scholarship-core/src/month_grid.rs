//! Month grid layout for the scholarship calendar.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{ScholarError, ScholarResult};
use crate::event_index::EventIndex;

/// A day inside the displayed month, with any scholarship due that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub event: Option<String>,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// "<day>\n\n<event text>" when something is due, otherwise just the day number.
    pub fn display(&self) -> String {
        match &self.event {
            Some(text) => format!("{}\n\n{}", self.day(), text),
            None => self.day().to_string(),
        }
    }
}

/// One row of the grid. `None` marks a day outside the month.
pub type Week = [Option<DayCell>; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, first_weekday: Weekday, index: &EventIndex) -> ScholarResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ScholarError::InvalidDate(format!("no such month {}-{:02}", year, month)))?;
        let days = days_in_month(first);

        let offset = (first.weekday().num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7;
        let rows = (offset + days).div_ceil(7);

        let weeks: Vec<Week> = (0..rows)
            .map(|row| {
                std::array::from_fn(|col| {
                    let slot = row * 7 + col as u32;
                    if slot < offset || slot >= offset + days {
                        return None;
                    }
                    let date = first.with_day(slot - offset + 1)?;
                    Some(DayCell {
                        date,
                        event: index.get(date).map(str::to_string),
                    })
                })
            })
            .collect();

        Ok(MonthGrid {
            year,
            month,
            first_weekday,
            weeks,
        })
    }

    /// Column headers, starting at the configured first day of the week.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut day = self.first_weekday;
        std::array::from_fn(|_| {
            let current = day;
            day = day.succ();
            current
        })
    }

    /// Day cells in the month, in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }

    /// Month title, e.g. "December 2024".
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Plain-text rendering: each week on its own line, cells separated by " | ".
    pub fn to_text(&self) -> String {
        self.weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| match cell {
                        Some(c) => c.display(),
                        None => " ".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };

    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRange;
    use crate::event_index::build_event_index;
    use crate::scholarship::{Catalog, ScholarshipRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_numbers(grid: &MonthGrid) -> Vec<Vec<Option<u32>>> {
        grid.weeks
            .iter()
            .map(|w| w.iter().map(|c| c.as_ref().map(DayCell::day)).collect())
            .collect()
    }

    #[test]
    fn december_2024_starting_monday() {
        let grid = MonthGrid::build(2024, 12, Weekday::Mon, &EventIndex::new()).unwrap();

        // Dec 1 2024 is a Sunday: six leading blanks, six rows
        assert_eq!(grid.weeks.len(), 6);
        let rows = day_numbers(&grid);
        let first_row = &rows[0];
        assert_eq!(first_row[..6], [None::<u32>; 6]);
        assert_eq!(first_row[6], Some(1));

        let last_row = &rows[5];
        assert_eq!(last_row[0], Some(30));
        assert_eq!(last_row[1], Some(31));
        assert!(last_row[2..].iter().all(Option::is_none));
    }

    #[test]
    fn sunday_first_shifts_columns() {
        let grid = MonthGrid::build(2024, 12, Weekday::Sun, &EventIndex::new()).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(day_numbers(&grid)[0][0], Some(1));
        assert_eq!(grid.weekdays()[0], Weekday::Sun);
        assert_eq!(grid.weekdays()[6], Weekday::Sat);
    }

    #[test]
    fn february_leap_year_has_29_days() {
        let grid = MonthGrid::build(2024, 2, Weekday::Mon, &EventIndex::new()).unwrap();
        assert_eq!(grid.days().count(), 29);
        let grid = MonthGrid::build(2025, 2, Weekday::Mon, &EventIndex::new()).unwrap();
        assert_eq!(grid.days().count(), 28);
    }

    #[test]
    fn event_days_show_text_below_day_number() {
        let records = vec![ScholarshipRecord::new("Kuru", date(2024, 12, 20), "Amount: $1,000.")];
        let index = build_event_index(&records, date(2024, 1, 1), date(2025, 12, 31));
        let grid = MonthGrid::build(2024, 12, Weekday::Mon, &index).unwrap();

        let cell = grid.days().find(|c| c.day() == 20).unwrap();
        assert_eq!(cell.display(), "20\n\nKuru\nAmount: $1,000.");

        let plain = grid.days().find(|c| c.day() == 21).unwrap();
        assert_eq!(plain.display(), "21");
    }

    #[test]
    fn month_without_events_matches_empty_index() {
        let catalog = Catalog::builtin();
        let index = EventIndex::build(catalog.records(), &DateRange::all());

        // No built-in scholarship is due in June 2025
        let with_catalog = MonthGrid::build(2025, 6, Weekday::Mon, &index).unwrap();
        let empty = MonthGrid::build(2025, 6, Weekday::Mon, &EventIndex::new()).unwrap();

        assert_eq!(day_numbers(&with_catalog), day_numbers(&empty));
        assert_eq!(with_catalog.to_text(), empty.to_text());
    }

    #[test]
    fn text_rendering_joins_cells() {
        let grid = MonthGrid::build(2024, 12, Weekday::Mon, &EventIndex::new()).unwrap();
        let first_line = grid.to_text().lines().next().unwrap().to_string();
        assert_eq!(first_line, "  |   |   |   |   |   | 1");
    }

    #[test]
    fn invalid_month_is_rejected() {
        let err = MonthGrid::build(2024, 13, Weekday::Mon, &EventIndex::new()).unwrap_err();
        assert!(matches!(err, ScholarError::InvalidDate(_)));
    }

    #[test]
    fn title_names_the_month() {
        let grid = MonthGrid::build(2025, 2, Weekday::Mon, &EventIndex::new()).unwrap();
        assert_eq!(grid.title(), "February 2025");
    }
}
