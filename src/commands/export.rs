use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scholarship_core::date_range::DateRange;
use scholarship_core::ics::generate_ics;
use scholarship_core::scholarship::Catalog;

pub fn run(catalog: &Catalog, range: &DateRange, output: &Path) -> Result<()> {
    let records = catalog.in_range(range);
    let ics = generate_ics(records.iter().copied())?;

    std::fs::write(output, ics)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format!(
            "  Exported {} {} to {}",
            records.len(),
            if records.len() == 1 { "deadline" } else { "deadlines" },
            output.display()
        )
        .green()
    );

    Ok(())
}
