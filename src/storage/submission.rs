//! Reading and writing player submissions, roster records and capability
//! tables.
//!
//! Submissions may be YAML (`.yaml`, `.yml`) or JSON (`.json`). Roster records
//! and capability overrides are YAML.

use std::{
    ffi::OsStr,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::domain::{CapabilityTable, Player, Roster};

/// Errors that can occur when loading a file from the data directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file was not found.
    #[error("file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The YAML could not be parsed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The file extension is not a supported format.
    #[error("unsupported file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// On-disk format of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML.
    Yaml,
    /// JSON.
    Json,
}

impl Format {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })
}

/// Loads a single player submission.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not YAML or JSON, or does
/// not describe a valid player. Malformed schedule slots are rejected.
pub fn load_player(path: &Path) -> Result<Player, LoadError> {
    let format = Format::of(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let reader = open(path)?;
    let player = match format {
        Format::Yaml => serde_yaml::from_reader(reader)?,
        Format::Json => serde_json::from_reader(reader)?,
    };
    Ok(player)
}

/// Writes a player submission as YAML.
///
/// # Errors
///
/// Returns an error if the player cannot be serialised or the file cannot be
/// written.
pub fn save_player(path: &Path, player: &Player) -> Result<(), LoadError> {
    let content = serde_yaml::to_string(player)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads a roster record. A missing file is an empty roster.
///
/// Duplicate entries for a player are dropped, keeping the first.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_roster(path: &Path) -> Result<Roster, LoadError> {
    match open(path) {
        Ok(reader) => {
            let entries: Vec<crate::domain::RosterEntry> = serde_yaml::from_reader(reader)?;
            Ok(entries.into_iter().collect())
        }
        Err(LoadError::NotFound) => {
            tracing::debug!("no roster at {}, starting empty", path.display());
            Ok(Roster::new())
        }
        Err(e) => Err(e),
    }
}

/// Writes a roster record.
///
/// # Errors
///
/// Returns an error if the roster cannot be serialised or the file cannot be
/// written.
pub fn save_roster(path: &Path, roster: &Roster) -> Result<(), LoadError> {
    let content = serde_yaml::to_string(roster)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads a capability table override, or `None` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_capabilities(path: &Path) -> Result<Option<CapabilityTable>, LoadError> {
    match open(path) {
        Ok(reader) => Ok(Some(serde_yaml::from_reader(reader)?)),
        Err(LoadError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{
        Involvement, RosterEntry,
        slot::{DaySlot, Weekday},
    };

    const YAML_PLAYER: &str = "\
id: thrall
name: Thrall
involvement: Core
availability:
  timezone: America/New_York
  schedule:
    Wednesday: ['02:30', '03:00']
    Mon: ['02:30']
classes:
  - class: shaman
    rank: 1
  - class: warrior
    rank: 2
";

    #[test]
    fn loads_yaml_player() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("thrall.yaml");
        std::fs::write(&path, YAML_PLAYER).unwrap();

        let player = load_player(&path).unwrap();

        assert_eq!(player.name, "Thrall");
        assert_eq!(player.involvement, Involvement::Core);
        assert_eq!(player.default_class(), Some("shaman"));
        assert_eq!(player.availability.schedule.len(), 3);
        assert!(
            player
                .availability
                .schedule
                .contains(DaySlot::new(Weekday::Monday, "02:30".parse().unwrap()))
        );
    }

    #[test]
    fn loads_json_player() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("jaina.json");
        std::fs::write(
            &path,
            r#"{"id":"jaina","name":"Jaina","involvement":"fill",
                "availability":{"timezone":"Europe/London","schedule":{"Monday":["02:30"]}}}"#,
        )
        .unwrap();

        let player = load_player(&path).unwrap();
        assert_eq!(player.involvement, Involvement::Fill);
        assert!(player.classes.is_empty());
        assert_eq!(player.default_class(), None);
    }

    #[test]
    fn rejects_malformed_slots() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, YAML_PLAYER.replace("'03:00'", "'03:15'")).unwrap();

        assert!(matches!(load_player(&path), Err(LoadError::Yaml(_))));
    }

    #[test]
    fn rejects_unknown_formats() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        assert!(matches!(
            load_player(&path),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_player_is_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_player(&tmp.path().join("ghost.yaml")),
            Err(LoadError::NotFound)
        ));
    }

    #[test]
    fn player_survives_save() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("thrall.yaml");
        std::fs::write(&source, YAML_PLAYER).unwrap();
        let player = load_player(&source).unwrap();

        let copy = tmp.path().join("copy.yaml");
        save_player(&copy, &player).unwrap();
        assert_eq!(load_player(&copy).unwrap(), player);
    }

    #[test]
    fn roster_record_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("roster.yaml");

        assert!(load_roster(&path).unwrap().is_empty());

        let roster: Roster = [
            RosterEntry::new("a", "Anduin", "priest").with_spec("holy"),
            RosterEntry::new("b", "Varian", "warrior"),
        ]
        .into_iter()
        .collect();
        save_roster(&path, &roster).unwrap();

        assert_eq!(load_roster(&path).unwrap(), roster);
    }

    #[test]
    fn capability_override_is_optional() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("capabilities.yaml");
        assert!(load_capabilities(&path).unwrap().is_none());

        std::fs::write(&path, "mage:\n  buffs: [intellect]\n").unwrap();
        let table = load_capabilities(&path).unwrap().unwrap();
        assert_eq!(table.len(), 1);
    }
}
