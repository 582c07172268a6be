//! A filesystem backed raid team.
//!
//! The data root holds:
//!
//! - `roster.toml`: team configuration (optional)
//! - `players/`: one submission file per player
//! - `roster.yaml`: the current roster record (optional)
//! - `capabilities.yaml`: capability table override (optional)

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    domain::{
        CapabilityTable, Config, ConfigError, Player, PlayerPool, Roster, RosterChange,
        RosterError,
    },
    storage::submission::{self, Format, LoadError},
};

const CONFIG_FILE: &str = "roster.toml";
const PLAYERS_DIR: &str = "players";
const ROSTER_FILE: &str = "roster.yaml";
const CAPABILITIES_FILE: &str = "capabilities.yaml";

/// State of a [`Directory`] whose contents have been read.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    config: Config,
    pool: PlayerPool,
    capabilities: CapabilityTable,
}

/// State of a [`Directory`] that has only been located.
#[derive(Debug, PartialEq, Eq)]
pub struct Unloaded;

/// A filesystem backed raid team.
pub struct Directory<S> {
    /// The data root.
    root: PathBuf,
    state: S,
}

impl<S> Directory<S> {
    /// The data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Directory holding player submissions.
    pub fn players_path(&self) -> PathBuf {
        self.root.join(PLAYERS_DIR)
    }

    /// Path of the roster record.
    pub fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    /// Loads the roster record. A missing record is an empty roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    pub fn load_roster(&self) -> Result<Roster, LoadError> {
        submission::load_roster(&self.roster_path())
    }

    /// Writes the roster record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn save_roster(&self, roster: &Roster) -> Result<(), LoadError> {
        submission::save_roster(&self.roster_path(), roster)
    }
}

impl Directory<Unloaded> {
    /// Opens a data root at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            state: Unloaded,
        }
    }

    /// Creates the configuration file and players directory if missing.
    ///
    /// Returns `true` if a configuration file was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or configuration cannot be written.
    pub fn init(&self) -> Result<bool, ConfigError> {
        std::fs::create_dir_all(self.players_path()).map_err(|source| ConfigError::Write {
            path: self.players_path(),
            source,
        })?;
        let path = self.config_path();
        if path.exists() {
            return Ok(false);
        }
        Config::default().save(&path)?;
        Ok(true)
    }

    /// Loads the configuration, capability table and every player.
    ///
    /// # Errors
    ///
    /// Fails if the configuration or capability override is malformed, or if
    /// any submission under `players/` cannot be loaded. Files with other
    /// extensions are ignored.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(self) -> Result<Directory<Loaded>, DirectoryLoadError> {
        let config = Config::load_or_default(&self.config_path())?;

        let capabilities =
            submission::load_capabilities(&self.root.join(CAPABILITIES_FILE))
                .map_err(DirectoryLoadError::Capabilities)?
                .unwrap_or_else(|| CapabilityTable::standard().clone());

        let paths = collect_submission_paths(&self.players_path());
        let (players, failures): (Vec<_>, Vec<_>) = paths
            .par_iter()
            .map(|path| try_load_player(path))
            .partition(Result::is_ok);

        let failures: Vec<_> = failures.into_iter().filter_map(Result::err).collect();
        if !failures.is_empty() {
            return Err(DirectoryLoadError::InvalidSubmissions(failures));
        }
        let players: Vec<Player> = players.into_iter().filter_map(Result::ok).collect();
        tracing::debug!("loaded {} players", players.len());

        Ok(Directory {
            root: self.root,
            state: Loaded {
                config,
                pool: PlayerPool::new(players),
                capabilities,
            },
        })
    }
}

impl Directory<Loaded> {
    /// The team configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.state.config
    }

    /// Every player with a submission.
    #[must_use]
    pub const fn pool(&self) -> &PlayerPool {
        &self.state.pool
    }

    /// The capability table in effect.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilityTable {
        &self.state.capabilities
    }

    /// Applies a change to the stored roster and persists the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the change is rejected or the roster cannot be
    /// read or written. A rejected change leaves the record untouched.
    pub fn update_roster(&self, change: RosterChange) -> Result<Roster, RosterUpdateError> {
        let roster = self.load_roster()?.apply(change)?;
        self.save_roster(&roster)?;
        Ok(roster)
    }
}

/// Error raised by [`Directory::update_roster`].
#[derive(Debug, thiserror::Error)]
pub enum RosterUpdateError {
    /// The roster record could not be read or written.
    #[error(transparent)]
    Storage(#[from] LoadError),
    /// The change was rejected.
    #[error(transparent)]
    Rejected(#[from] RosterError),
}

/// Error raised by [`Directory::load_all`].
#[derive(Debug, thiserror::Error)]
pub enum DirectoryLoadError {
    /// The configuration file is malformed.
    Config(#[from] ConfigError),
    /// The capability override is malformed.
    Capabilities(#[source] LoadError),
    /// One or more submissions failed to load.
    InvalidSubmissions(Vec<(PathBuf, LoadError)>),
}

impl fmt::Display for DirectoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Capabilities(e) => write!(f, "failed to load capability table: {e}"),
            Self::InvalidSubmissions(failures) => {
                write!(f, "Invalid submissions: ")?;
                for (i, (path, error)) in failures.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} ({error})", path.display())?;
                }
                Ok(())
            }
        }
    }
}

fn collect_submission_paths(players: &Path) -> Vec<PathBuf> {
    WalkDir::new(players)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let supported = Format::of(entry.path()).is_some();
            if !supported {
                tracing::debug!("Skipping non-submission file {}", entry.path().display());
            }
            supported
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn try_load_player(path: &Path) -> Result<Player, (PathBuf, LoadError)> {
    submission::load_player(path).map_err(|e| {
        tracing::debug!("Failed to load player from {}: {e}", path.display());
        (path.to_path_buf(), e)
    })
}
