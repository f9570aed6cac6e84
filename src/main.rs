mod commands;
mod prompt;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Weekday};
use clap::{Parser, Subcommand};
use scholarship_core::ScholarResult;
use scholarship_core::config::FinderConfig;
use scholarship_core::date_range::DateRange;
use scholarship_core::scholarship::Catalog;

#[derive(Parser)]
#[command(name = "scholarship-finder")]
#[command(about = "Browse scholarship deadlines and keep your student profile")]
struct Cli {
    /// Use this config file instead of ~/.config/scholarship-finder/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show scholarship due dates on a month calendar
    Calendar {
        /// Year to display (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to display, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only include scholarships due on or after this date (YYYY-MM-DD, or "start")
        #[arg(long)]
        from: Option<String>,

        /// Only include scholarships due on or before this date (YYYY-MM-DD, or "end")
        #[arg(long)]
        to: Option<String>,

        /// First day of the week (e.g. "monday", "sun")
        #[arg(long)]
        week_start: Option<String>,

        /// Print cells separated by " | " without colors
        #[arg(long)]
        plain: bool,
    },
    /// List scholarships, optionally filtered by due date
    Scholarships {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
    /// Find scholarships (shows the full list)
    Find,
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Check a username and password
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Fill in your profile and preferences, then save them to your account
    Preferences {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Show the preferences saved to your account
    Profile {
        #[arg(short, long)]
        username: Option<String>,

        /// Print the stored profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write scholarship deadlines to an .ics file
    Export {
        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FinderConfig::load_from(path)?,
        None => FinderConfig::load()?,
    };

    match cli.command {
        Commands::Calendar {
            year,
            month,
            from,
            to,
            week_start,
            plain,
        } => {
            let today = Local::now().date_naive();
            let range = parse_range(from.as_deref(), to.as_deref(), config.default_range())?;
            let week_start = match week_start {
                Some(w) => w
                    .parse::<Weekday>()
                    .map_err(|_| anyhow::anyhow!("Unknown weekday '{}'", w))?,
                None => config.week_start()?,
            };
            let options = commands::calendar::CalendarOptions {
                year: year.unwrap_or(today.year()),
                month: month.unwrap_or(today.month()),
                range,
                week_start,
                collision: config.collision,
                plain,
            };
            commands::calendar::run(&load_catalog(&config)?, &options)
        }
        Commands::Scholarships { from, to } => {
            let range = parse_range(from.as_deref(), to.as_deref(), DateRange::all())?;
            commands::scholarships::run(&load_catalog(&config)?, &range)
        }
        Commands::Find => commands::find::run(&load_catalog(&config)?),
        Commands::Signup { username } => with_store(&config, |store| commands::signup::run(store, username)),
        Commands::Login { username } => with_store(&config, |store| commands::login::run(store, username)),
        Commands::Preferences { username } => {
            with_store(&config, |store| commands::preferences::run(store, username))
        }
        Commands::Profile { username, json } => {
            with_store(&config, |store| commands::profile::run(store, username, json))
        }
        Commands::Export { output, from, to } => {
            let range = parse_range(from.as_deref(), to.as_deref(), DateRange::all())?;
            commands::export::run(&load_catalog(&config)?, &range, &output)
        }
    }
}

fn parse_range(from: Option<&str>, to: Option<&str>, default: DateRange) -> Result<DateRange> {
    Ok(DateRange::from_args(from, to, default)?)
}

fn load_catalog(config: &FinderConfig) -> Result<Catalog> {
    config.catalog().context("Failed to load scholarship list")
}

/// Open the account database for one command and close it afterwards.
fn with_store<F>(config: &FinderConfig, f: F) -> Result<()>
where
    F: FnOnce(&mut scholarship_core::credentials::SqliteCredentialStore) -> Result<()>,
{
    let path = config.database_path();
    let mut store = config
        .open_store()
        .with_context(|| format!("Failed to open account database at {}", path.display()))?;

    let result = f(&mut store);
    finish(result, store.close())
}

/// A failed command keeps its own error; a close failure is then only logged.
fn finish(result: Result<()>, closed: ScholarResult<()>) -> Result<()> {
    match (result, closed) {
        (Err(e), Err(close_err)) => {
            log::warn!("{}", close_err);
            Err(e)
        }
        (result, Ok(())) => result,
        (Ok(()), Err(close_err)) => Err(close_err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarship_core::ScholarError;

    fn close_failed() -> ScholarResult<()> {
        Err(ScholarError::Storage("Failed to close credential store: busy".into()))
    }

    #[test]
    fn command_error_wins_over_close_error() {
        let err = finish(Err(anyhow::anyhow!("Invalid username or password")), close_failed()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn close_error_surfaces_after_success() {
        let err = finish(Ok(()), close_failed()).unwrap_err();
        assert!(err.to_string().contains("Failed to close credential store"));
    }

    #[test]
    fn clean_close_passes_result_through() {
        assert!(finish(Ok(()), Ok(())).is_ok());
        assert!(finish(Err(anyhow::anyhow!("boom")), Ok(())).is_err());
    }
}
