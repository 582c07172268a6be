use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    capability::RaidUtility,
    classes::Role,
    session::SessionCalendar,
    timezone::{default_reference_week, monday_of},
};

/// Error raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("failed to write config file {path}: {source}")]
    Write {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// Desired number of players per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTargets {
    /// Tanks.
    pub tank: usize,
    /// Healers.
    pub healer: usize,
    /// Damage dealers.
    pub damage: usize,
}

impl Default for RoleTargets {
    fn default() -> Self {
        Self {
            tank: 2,
            healer: 4,
            damage: 14,
        }
    }
}

impl RoleTargets {
    /// The target for a role.
    #[must_use]
    pub const fn target(&self, role: Role) -> usize {
        match role {
            Role::Tank => self.tank,
            Role::Healer => self.healer,
            Role::Damage => self.damage,
        }
    }
}

/// Settings for the raid team.
///
/// Stored as `roster.toml` in the data root. Every field is optional in the
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The recurring raid sessions, in UTC.
    pub sessions: SessionCalendar,

    /// Desired role split.
    pub role_targets: RoleTargets,

    /// Number of seats in the raid.
    pub raid_size: usize,

    /// The week used to map local time to UTC.
    ///
    /// Any date is accepted and snapped back to its Monday. When unset, a
    /// fixed reference week is used.
    reference_week: Option<NaiveDate>,

    /// Utilities called out in composition summaries.
    pub key_utilities: Vec<RaidUtility>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sessions: SessionCalendar::default(),
            role_targets: RoleTargets::default(),
            raid_size: default_raid_size(),
            reference_week: None,
            key_utilities: default_key_utilities(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration, falling back to the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The Monday of the week used to build slot indices.
    #[must_use]
    pub fn reference_week(&self) -> NaiveDate {
        self.reference_week
            .map_or_else(default_reference_week, monday_of)
    }

    /// Pins slot indices to the week containing `date`.
    pub fn set_reference_week(&mut self, date: Option<NaiveDate>) {
        self.reference_week = date.map(monday_of);
    }
}

const fn default_raid_size() -> usize {
    20
}

fn default_key_utilities() -> Vec<RaidUtility> {
    vec![
        RaidUtility::Bloodlust,
        RaidUtility::CombatRes,
        RaidUtility::MassDispel,
        RaidUtility::WarlockKit,
        RaidUtility::RallyingCry,
        RaidUtility::Innervate,
        RaidUtility::Darkness,
    ]
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        sessions: SessionCalendar,

        #[serde(default)]
        role_targets: RoleTargets,

        #[serde(default = "default_raid_size")]
        raid_size: usize,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_week: Option<NaiveDate>,

        #[serde(default = "default_key_utilities")]
        key_utilities: Vec<RaidUtility>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                sessions,
                role_targets,
                raid_size,
                reference_week,
                key_utilities,
            } => Self {
                sessions,
                role_targets,
                raid_size,
                reference_week: reference_week.map(monday_of),
                key_utilities,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            sessions: config.sessions,
            role_targets: config.role_targets,
            raid_size: config.raid_size,
            reference_week: config.reference_week,
            key_utilities: config.key_utilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::slot::Weekday;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"_version = "1"
raid_size = 25
reference_week = "2024-03-06"
key_utilities = ["bloodlust"]

[role_targets]
tank = 2
healer = 5
damage = 18

[[sessions]]
day = "Friday"
start = "19:00"
end = "22:00"
"#,
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.raid_size, 25);
        assert_eq!(config.role_targets.target(Role::Healer), 5);
        assert_eq!(config.key_utilities, vec![RaidUtility::Bloodlust]);
        assert_eq!(config.sessions.len(), 1);
        assert_eq!(config.sessions.sessions()[0].day, Weekday::Friday);
        assert_eq!(
            config.reference_week(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&tmp.path().join("roster.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nraid_size = \"twenty\"\n")
            .unwrap();

        let error = Config::load_or_default(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.reference_week(), default_reference_week());
        assert_eq!(actual.sessions.len(), 2);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("roster.toml");

        let mut config = Config::default();
        config.raid_size = 30;
        config.set_reference_week(NaiveDate::from_ymd_opt(2025, 1, 1));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
