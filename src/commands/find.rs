use anyhow::Result;
use owo_colors::OwoColorize;
use scholarship_core::date_range::DateRange;
use scholarship_core::scholarship::Catalog;

use crate::render::render_records;

/// Lists every scholarship. Saved profiles are not consulted.
pub fn run(catalog: &Catalog) -> Result<()> {
    println!("{}", "Searching for scholarships...".dimmed());

    let records = catalog.in_range(&DateRange::all());
    if records.is_empty() {
        println!("{}", "No scholarships found.".dimmed());
        return Ok(());
    }

    println!("{}", "Here are your matching scholarships!".green());
    println!();
    println!("{}", render_records(&records));

    Ok(())
}
