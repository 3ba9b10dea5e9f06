//! Agenda configuration.
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! year_min = 2012
//! year_max = 2014
//! date_format = 2          # 1 = dd/mm/yyyy, 2 = "<weekday> semaine <n> <yyyy>"
//! max_appointments = 50
//! save_mode = "immediate"  # or "on-exit"
//! data_file = "data/agenda.rdv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agenda::DEFAULT_CAPACITY;
use crate::error::{AgendaError, ConfigError, Result};
use crate::temporal::{DateFormat, ParseOptions, YearRange, MANAGED_YEAR_MAX, MANAGED_YEAR_MIN};

/// File looked up when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "agenda.toml";

/// Record file used when the configuration does not name one.
pub const DEFAULT_DATA_FILE: &str = "data/agenda.rdv";

/// `max_appointments` must be strictly greater than this.
pub const MIN_CAPACITY_EXCLUSIVE: usize = 20;

/// When changes to the appointment list reach the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaveMode {
    /// Every change is written through as soon as it is made.
    Immediate,
    /// Changes are written when the agenda is closed.
    #[default]
    OnExit,
}

impl FromStr for SaveMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(SaveMode::Immediate),
            "on-exit" => Ok(SaveMode::OnExit),
            other => Err(format!("save mode must be 'immediate' or 'on-exit', got '{other}'")),
        }
    }
}

/// User preferences for the agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// First managed year.
    pub year_min: i32,
    /// Last managed year.
    pub year_max: i32,
    /// Notation for interactively entered dates.
    pub date_format: DateFormat,
    /// Capacity of the appointment list.
    pub max_appointments: usize,
    pub save_mode: SaveMode,
    /// Appointment record file.
    pub data_file: PathBuf,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            year_min: MANAGED_YEAR_MIN,
            year_max: MANAGED_YEAR_MAX,
            date_format: DateFormat::default(),
            max_appointments: DEFAULT_CAPACITY,
            save_mode: SaveMode::default(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl FromStr for AgendaConfig {
    type Err = AgendaError;

    /// Parse and validate TOML text.
    fn from_str(content: &str) -> Result<Self> {
        let config: AgendaConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

impl AgendaConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        content.parse()
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFile)?;
        }
        fs::write(path, self.to_toml()?).map_err(ConfigError::WriteFile)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self).map_err(ConfigError::Serialize)?)
    }

    /// Check every value against the agenda's policy.
    pub fn validate(&self) -> Result<()> {
        if self.year_min < MANAGED_YEAR_MIN {
            return Err(invalid(format!(
                "year_min must be at least {MANAGED_YEAR_MIN}, got {}",
                self.year_min
            )));
        }
        if self.year_max > MANAGED_YEAR_MAX {
            return Err(invalid(format!(
                "year_max must be at most {MANAGED_YEAR_MAX}, got {}",
                self.year_max
            )));
        }
        if self.year_min > self.year_max {
            return Err(invalid(format!(
                "year_min ({}) is after year_max ({})",
                self.year_min, self.year_max
            )));
        }
        if self.max_appointments <= MIN_CAPACITY_EXCLUSIVE {
            return Err(invalid(format!(
                "max_appointments must be greater than {MIN_CAPACITY_EXCLUSIVE}, got {}",
                self.max_appointments
            )));
        }
        Ok(())
    }

    /// Update one key from its textual value. The configuration is left
    /// untouched when the new value is refused.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "year_min" => updated.year_min = parse_value(key, value)?,
            "year_max" => updated.year_max = parse_value(key, value)?,
            "date_format" => {
                let code: u8 = parse_value(key, value)?;
                updated.date_format = DateFormat::try_from(code).map_err(invalid)?;
            }
            "max_appointments" => updated.max_appointments = parse_value(key, value)?,
            "save_mode" => updated.save_mode = value.parse().map_err(invalid)?,
            "data_file" => updated.data_file = PathBuf::from(value),
            other => return Err(ConfigError::UnknownKey(other.to_string()).into()),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.year_min, self.year_max).unwrap_or_default()
    }

    /// Options threaded into every date/time parse.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            years: self.year_range(),
            format: self.date_format,
        }
    }
}

fn invalid(message: String) -> AgendaError {
    ConfigError::Invalid(message).into()
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("'{value}' is not a valid value for {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
year_min = 2012
year_max = 2013
date_format = 2
save_mode = "immediate"
"#;
        let config: AgendaConfig = toml.parse().unwrap();
        assert_eq!(config.year_min, 2012);
        assert_eq!(config.year_max, 2013);
        assert_eq!(config.date_format, DateFormat::WeekdayWeekYear);
        assert_eq!(config.save_mode, SaveMode::Immediate);
        // Omitted keys fall back to defaults.
        assert_eq!(config.max_appointments, DEFAULT_CAPACITY);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AgendaConfig = "".parse().unwrap();
        assert_eq!(config, AgendaConfig::default());
    }

    #[test]
    fn test_rejects_unknown_date_format() {
        assert!("date_format = 3".parse::<AgendaConfig>().is_err());
    }

    #[test]
    fn test_rejects_years_outside_managed_range() {
        assert!("year_min = 1949".parse::<AgendaConfig>().is_err());
        assert!("year_max = 2051".parse::<AgendaConfig>().is_err());
        assert!("year_min = 2013\nyear_max = 2012".parse::<AgendaConfig>().is_err());
    }

    #[test]
    fn test_rejects_small_capacity() {
        assert!("max_appointments = 20".parse::<AgendaConfig>().is_err());
        assert!("max_appointments = 21".parse::<AgendaConfig>().is_ok());
    }

    #[test]
    fn test_set_updates_and_validates() {
        let mut config = AgendaConfig::default();
        config.set("year_min", "2012").unwrap();
        config.set("date_format", "2").unwrap();
        config.set("save_mode", "immediate").unwrap();
        assert_eq!(config.year_min, 2012);
        assert_eq!(config.date_format, DateFormat::WeekdayWeekYear);
        assert_eq!(config.save_mode, SaveMode::Immediate);

        assert!(config.set("year_max", "2000").is_err());
        assert_eq!(config.year_max, MANAGED_YEAR_MAX, "refused value leaves config untouched");
        assert!(config.set("max_appointments", "lots").is_err());
        assert!(matches!(
            config.set("colour", "blue"),
            Err(AgendaError::Config(ConfigError::UnknownKey(_)))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AgendaConfig::default();
        config.set("year_max", "2020").unwrap();
        let text = config.to_toml().unwrap();
        let back: AgendaConfig = text.parse().unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_parse_options_follow_config() {
        let config: AgendaConfig = "year_min = 2012\nyear_max = 2012\ndate_format = 2"
            .parse()
            .unwrap();
        let options = config.parse_options();
        assert_eq!(options.years, YearRange::new(2012, 2012).unwrap());
        assert_eq!(options.format, DateFormat::WeekdayWeekYear);
    }
}
