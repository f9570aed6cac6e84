//! Global scholarship-finder configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::credentials::{DEFAULT_HASH_ITERATIONS, PasswordHasher, SqliteCredentialStore};
use crate::date_range::DateRange;
use crate::error::{ScholarError, ScholarResult};
use crate::event_index::CollisionPolicy;
use crate::scholarship::Catalog;

static APP_DIR: &str = "scholarship-finder";
static ENV_PREFIX: &str = "SCHOLARSHIP_FINDER";
static DEFAULT_WEEK_START: &str = "monday";

fn default_database() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join("users.db"))
        .unwrap_or_else(|| PathBuf::from("users.db"))
}

fn default_week_start() -> String {
    DEFAULT_WEEK_START.to_string()
}

fn default_hash_iterations() -> u32 {
    DEFAULT_HASH_ITERATIONS
}

fn default_range_start() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
}

fn default_range_end() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 12, 31)
}

/// Configuration at ~/.config/scholarship-finder/config.toml
///
/// Every key can be overridden from the environment with the
/// `SCHOLARSHIP_FINDER_` prefix, e.g. `SCHOLARSHIP_FINDER_DATABASE`.
#[derive(Debug, Clone, Deserialize)]
pub struct FinderConfig {
    /// SQLite file holding accounts (`~` is expanded)
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Scholarship list to use instead of the built-in one
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// First column of the calendar grid
    #[serde(default = "default_week_start")]
    pub week_start: String,

    #[serde(default)]
    pub collision: CollisionPolicy,

    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    /// Default calendar filter bounds
    #[serde(default = "default_range_start")]
    pub range_start: Option<NaiveDate>,

    #[serde(default = "default_range_end")]
    pub range_end: Option<NaiveDate>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            database: default_database(),
            dataset: None,
            week_start: default_week_start(),
            collision: CollisionPolicy::default(),
            hash_iterations: default_hash_iterations(),
            range_start: default_range_start(),
            range_end: default_range_end(),
        }
    }
}

impl FinderConfig {
    pub fn config_path() -> ScholarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScholarError::Config("Could not determine config directory".into()))?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load the default config file, creating a commented one on first run.
    pub fn load() -> ScholarResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ScholarResult<Self> {
        let config: FinderConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ScholarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScholarError::Config(e.to_string()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScholarResult<()> {
        let contents = format!(
            "\
# scholarship-finder configuration

# Where accounts are stored:
# database = \"{}\"

# Scholarship list (TOML with [[scholarships]] or a JSON array):
# dataset = \"~/scholarships.toml\"

# First day of the week in the calendar view:
# week_start = \"{}\"

# Same-day scholarships: \"last-write-wins\" or \"append\"
# collision = \"last-write-wins\"

# PBKDF2 rounds for new passwords:
# hash_iterations = {}

# Default calendar date filter:
# range_start = \"2024-01-01\"
# range_end = \"2025-12-31\"
",
            default_database().display(),
            DEFAULT_WEEK_START,
            DEFAULT_HASH_ITERATIONS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScholarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScholarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand(&self.database)
    }

    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset.as_deref().map(expand)
    }

    pub fn week_start(&self) -> ScholarResult<Weekday> {
        Weekday::from_str(self.week_start.trim()).map_err(|_| {
            ScholarError::Config(format!("Unknown week_start '{}'", self.week_start))
        })
    }

    pub fn default_range(&self) -> DateRange {
        DateRange {
            from: self.range_start,
            to: self.range_end,
        }
    }

    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.hash_iterations)
    }

    pub fn catalog(&self) -> ScholarResult<Catalog> {
        Catalog::load(self.dataset_path().as_deref())
    }

    pub fn open_store(&self) -> ScholarResult<SqliteCredentialStore> {
        SqliteCredentialStore::open(&self.database_path(), self.hasher())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
