//! Filesystem storage for player submissions, roster records and overrides.

pub mod directory;
pub mod submission;

pub use directory::{Directory, DirectoryLoadError, Loaded, RosterUpdateError, Unloaded};
pub use submission::LoadError;
