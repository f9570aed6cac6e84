use anyhow::Result;
use owo_colors::OwoColorize;
use scholarship_core::date_range::DateRange;
use scholarship_core::scholarship::Catalog;

use crate::render::render_records;

pub fn run(catalog: &Catalog, range: &DateRange) -> Result<()> {
    let mut records = catalog.in_range(range);

    if records.is_empty() {
        println!("{}", "No scholarships available for the selected date range.".dimmed());
        return Ok(());
    }

    records.sort_by_key(|r| r.due_date);
    println!("{}", render_records(&records));

    Ok(())
}
