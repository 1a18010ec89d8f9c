//! Runtime settings read from the environment (and `.env` via `dotenvy`).

use anyhow::{Context, Result};

pub const LOG_FILE_PATH_VAR: &str = "LOG_FILE_PATH";
pub const PASS_MARK_VAR: &str = "GRADE_STATS_PASS_MARK";

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/grade_stats.log";

/// Subject means at or above this are shown as passing.
pub const DEFAULT_PASS_MARK: f64 = 6.0;

/// Settings needed before the command runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_file_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(path) = lookup(LOG_FILE_PATH_VAR) {
            settings.log_file_path = path;
        }

        settings
    }
}

/// Reads the pass mark from the process environment.
pub fn pass_mark_from_env() -> Result<f64> {
    pass_mark_from_lookup(|key| std::env::var(key).ok())
}

/// Reads the pass mark through `lookup`, defaulting to [`DEFAULT_PASS_MARK`].
///
/// Only commands that grade subjects call this, so a bad value does not
/// affect the others.
///
/// # Errors
///
/// Returns an error if the pass mark is set but is not a finite number.
pub fn pass_mark_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<f64> {
    match lookup(PASS_MARK_VAR) {
        Some(raw) => {
            parse_pass_mark(&raw).with_context(|| format!("invalid {PASS_MARK_VAR}: {raw:?}"))
        }
        None => Ok(DEFAULT_PASS_MARK),
    }
}

fn parse_pass_mark(raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse()?;
    anyhow::ensure!(value.is_finite(), "pass mark must be finite");
    Ok(value)
}
