//! Terminal rendering for scholarship-core types.
//!
//! Extension traits that add colored output using owo_colors.

use owo_colors::OwoColorize;
use scholarship_core::month_grid::{DayCell, MonthGrid, Week};
use scholarship_core::profile::StudentProfile;
use scholarship_core::scholarship::ScholarshipRecord;

/// Width of one calendar column; longer cell lines are clipped.
const CELL_WIDTH: usize = 16;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScholarshipRecord {
    fn render(&self) -> String {
        format!(
            "{} {}\n   {}",
            self.due_date.format("%a %b %-d %Y").to_string().bold(),
            self.name,
            self.summary.dimmed()
        )
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", self.title().bold())];

        let header = self
            .weekdays()
            .iter()
            .map(|wd| format!("{:<width$}", wd.to_string(), width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(header.dimmed().to_string());

        for week in &self.weeks {
            lines.extend(render_week(week));
        }

        lines.join("\n")
    }
}

/// One week as terminal lines, tall enough for its longest cell.
fn render_week(week: &Week) -> Vec<String> {
    let cells: Vec<Vec<String>> = week.iter().map(cell_lines).collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);

    (0..height)
        .map(|i| {
            week.iter()
                .zip(&cells)
                .map(|(cell, lines)| {
                    let text = lines.get(i).map(String::as_str).unwrap_or_default();
                    let padded = format!("{:<width$}", text, width = CELL_WIDTH);
                    match cell {
                        Some(c) if c.event.is_some() => padded.green().to_string(),
                        _ => padded,
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Lines of `DayCell::display`, clipped to the column width. Blank days are empty.
fn cell_lines(cell: &Option<DayCell>) -> Vec<String> {
    match cell {
        None => vec![String::new()],
        Some(c) => c.display().lines().map(clip).collect(),
    }
}

fn clip(line: &str) -> String {
    if line.chars().count() <= CELL_WIDTH {
        return line.to_string();
    }
    let mut clipped: String = line.chars().take(CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}

/// Render a list of scholarships, one block per record.
pub fn render_records(records: &[&ScholarshipRecord]) -> String {
    records
        .iter()
        .map(|r| r.render())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Render for StudentProfile {
    fn render(&self) -> String {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        let join = |items: Vec<String>| {
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(", ")
            }
        };

        let rows = [
            ("Full Name", self.full_name.clone()),
            ("Email", self.email.clone()),
            ("Age", self.age.to_string()),
            ("Gender", self.gender.to_string()),
            ("GPA", format!("{:.1}", self.gpa)),
            ("Major", self.major.clone()),
            ("School Year", self.school_year.to_string()),
            (
                "SAT/ACT Score",
                self.test_score.map(|s| s.to_string()).unwrap_or_else(|| "(none)".into()),
            ),
            ("Financial Need", yes_no(self.financial_need).to_string()),
            ("Ethnicity", self.ethnicity.clone().unwrap_or_else(|| "(none)".into())),
            ("State", self.state.clone()),
            ("Disability", yes_no(self.disability).to_string()),
            (
                "Scholarship Types",
                join(self.scholarship_types.iter().map(|t| t.to_string()).collect()),
            ),
            ("Causes", join(self.causes.iter().map(|c| c.to_string()).collect())),
        ];

        rows.iter()
            .map(|(label, value)| {
                let label = format!("{:<18}", format!("{}:", label));
                format!("  {} {}", label.dimmed(), value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use scholarship_core::event_index::EventIndex;

    fn cell(day: u32, event: Option<&str>) -> Option<DayCell> {
        Some(DayCell {
            date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            event: event.map(str::to_string),
        })
    }

    #[test]
    fn cell_lines_follow_day_cell_display() {
        assert_eq!(cell_lines(&None), vec![""]);
        assert_eq!(cell_lines(&cell(7, None)), vec!["7"]);
        assert_eq!(
            cell_lines(&cell(20, Some("Kuru\nAmount: $1,000."))),
            vec!["20", "", "Kuru", "Amount: $1,000."]
        );
    }

    #[test]
    fn long_lines_are_clipped_to_the_column() {
        let lines = cell_lines(&cell(1, Some("The Elie Wiesel Prize in Ethics")));
        assert_eq!(lines[2].chars().count(), CELL_WIDTH);
        assert!(lines[2].ends_with('…'));
    }

    #[test]
    fn plain_week_is_one_line_of_fixed_columns() {
        let week: Week = std::array::from_fn(|i| if i < 6 { None } else { cell(1, None) });
        let lines = render_week(&week);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].chars().count(), 7 * CELL_WIDTH + 6);
        assert_eq!(lines[0].trim(), "1");
    }

    #[test]
    fn month_shows_event_text_inside_its_cell() {
        let mut index = EventIndex::new();
        index.insert(
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            "Kuru\nAmount: $1,000.".to_string(),
            Default::default(),
        );
        let grid = MonthGrid::build(2024, 12, Weekday::Mon, &index).unwrap();

        let out = grid.render();
        assert!(out.contains("December 2024"));
        assert!(out.contains("20"));
        assert!(out.contains("Kuru"));
        assert!(out.contains("Amount: $1,000."));
        // Title, header, five plain weeks and one four-line week
        assert_eq!(out.lines().count(), 2 + 5 + 4);
    }
}
