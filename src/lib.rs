//! Raid roster intelligence.
//!
//! Players submit their weekly availability in UTC half-hour slots along with
//! the classes they are willing to play. This crate turns those submissions
//! into availability heatmaps and per-session coverage for any viewer
//! timezone, and analyses a roster for role balance, raid buffs and utility
//! cooldowns.

pub mod domain;
pub use domain::{
    CompositionAnalyzer, CompositionReport, Config, Heatmap, Player, Roster, RosterChange,
    SlotIndex,
};

/// Filesystem storage for submissions and roster records.
pub mod storage;
pub use storage::Directory;
