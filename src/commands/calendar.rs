use anyhow::Result;
use chrono::Weekday;
use owo_colors::OwoColorize;
use scholarship_core::date_range::DateRange;
use scholarship_core::event_index::{CollisionPolicy, EventIndex};
use scholarship_core::month_grid::MonthGrid;
use scholarship_core::scholarship::Catalog;

use crate::render::{Render, render_records};

pub struct CalendarOptions {
    pub year: i32,
    pub month: u32,
    pub range: DateRange,
    pub week_start: Weekday,
    pub collision: CollisionPolicy,
    pub plain: bool,
}

pub fn run(catalog: &Catalog, options: &CalendarOptions) -> Result<()> {
    let filtered = catalog.in_range(&options.range);
    let index = EventIndex::build_with(catalog.records(), &options.range, options.collision);
    let grid = MonthGrid::build(options.year, options.month, options.week_start, &index)?;

    if options.plain {
        println!("{}", grid.title());
        println!("{}", grid.to_text());
    } else {
        println!("{}", grid.render());
    }

    println!();
    println!("{}", "Scholarship Details".bold());
    if filtered.is_empty() {
        println!("{}", "No scholarships available for the selected date range.".dimmed());
    } else {
        println!("{}", render_records(&filtered));
    }

    Ok(())
}
