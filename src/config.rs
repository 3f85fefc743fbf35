//! Runtime configuration.
//!
//! Settings come from an optional TOML file; every field has a default so an
//! absent file or an empty table is valid. Resolution order:
//!
//! 1. `.env` is loaded (if present) into the process environment.
//! 2. The file named by `--config`, else by `WQI_CONFIG`, is parsed.
//! 3. `WQI_LOG_LEVEL` overrides `logging.level`, unless the command line
//!    asked for a level (`--verbose`), in which case the variable is ignored.
//!
//! ```toml
//! [forecast]
//! default_date = "2025-06-01"
//!
//! [trend]
//! start_year = 2020
//! end_year = 2030
//! month = 6
//!
//! [logging]
//! level = "info"
//! file = "wqi.log"
//! timestamps = false
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::logging::LogLevel;
use crate::model::WqiError;

pub const CONFIG_PATH_VAR: &str = "WQI_CONFIG";
pub const LOG_LEVEL_VAR: &str = "WQI_LOG_LEVEL";

/// Date preselected when the user gives none.
pub const DEFAULT_DATE: &str = "2025-06-01";

/// Longest trend series, in years, a single request may ask for.
pub const MAX_TREND_YEARS: i64 = 1000;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSettings {
    pub default_date: String,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self { default_date: DEFAULT_DATE.to_string() }
    }
}

/// Year range and month of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendSettings {
    pub start_year: i32,
    pub end_year: i32,
    pub month: u32,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self { start_year: 2020, end_year: 2030, month: 6 }
    }
}

impl TrendSettings {
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    pub fn validate(&self) -> Result<(), WqiError> {
        if self.start_year > self.end_year {
            return Err(WqiError::Config(format!(
                "trend start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        if span > MAX_TREND_YEARS {
            return Err(WqiError::Config(format!(
                "trend covers {} years, at most {} are allowed",
                span, MAX_TREND_YEARS
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(WqiError::InvalidMonth(self.month));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), file: None, timestamps: false }
    }
}

impl LoggingSettings {
    pub fn level(&self) -> Result<LogLevel, WqiError> {
        self.level.parse()
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub forecast: ForecastSettings,
    pub trend: TrendSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, WqiError> {
        let config: Config =
            toml::from_str(text).map_err(|e| WqiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, WqiError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WqiError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Resolves configuration from the flag, `.env` and the environment.
    ///
    /// `level_override` comes from the command line and wins over both the
    /// file and `WQI_LOG_LEVEL`.
    pub fn load(
        explicit_path: Option<&Path>,
        level_override: Option<LogLevel>,
    ) -> Result<Self, WqiError> {
        dotenv::dotenv().ok();

        let env_path = std::env::var(CONFIG_PATH_VAR).ok();
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match env_path.as_deref() {
                Some(path) if !path.trim().is_empty() => Self::from_file(Path::new(path))?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok(), level_override)?;
        Ok(config)
    }

    /// Applies environment overrides through `lookup`, then revalidates.
    /// An explicit `level_override` skips `WQI_LOG_LEVEL` entirely.
    pub fn apply_env_overrides<F>(
        &mut self,
        lookup: F,
        level_override: Option<LogLevel>,
    ) -> Result<(), WqiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match level_override {
            Some(level) => self.logging.level = level.to_string().to_ascii_lowercase(),
            None => {
                if let Some(level) = lookup(LOG_LEVEL_VAR) {
                    self.logging.level = level;
                }
            }
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), WqiError> {
        self.trend.validate()?;
        self.logging.level()?;
        self.default_date()?;
        Ok(())
    }

    pub fn default_date(&self) -> Result<NaiveDate, WqiError> {
        parse_date(&self.forecast.default_date)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, WqiError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| WqiError::InvalidDate(text.to_string()))
}

/// Maps a `--date` argument to the selected date.
///
/// An absent argument selects `default`; a blank one selects nothing.
pub fn resolve_selection(
    argument: Option<&str>,
    default: NaiveDate,
) -> Result<Option<NaiveDate>, WqiError> {
    match argument {
        None => Ok(Some(default)),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_date(text).map(Some),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
