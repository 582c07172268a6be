//! Domain models for raid planning.
//!
//! Availability is stored in UTC half-hour slots and read back through a
//! [`SlotIndex`] for any viewer timezone. Composition is derived from the
//! roster and the static class and capability tables.

/// Weekdays and half-hour slots.
pub mod slot;
pub use slot::{DaySlot, HalfHourSlot, SlotError, Weekday};

/// Weekly availability schedules.
pub mod schedule;
pub use schedule::{Availability, Schedule};

pub mod session;
pub use session::{RaidSession, SessionCalendar};

pub mod timezone;
pub use timezone::{InvalidTimezone, LocalizedSession, SlotIndex};

pub mod heatmap;
pub use heatmap::{Heatmap, Participant};

pub mod coverage;
pub use coverage::{CoverageStatus, SessionCoverage};

pub mod classes;
pub use classes::{ClassInfo, Role, SpecInfo};

pub mod capability;
pub use capability::{Capabilities, CapabilityKey, CapabilityTable, RaidBuff, RaidUtility};

pub mod roster;
pub use roster::{
    Involvement, Player, PlayerPool, Roster, RosterChange, RosterEntry, RosterError,
};

pub mod composition;
pub use composition::{CompositionAnalyzer, CompositionReport};

mod config;
pub use config::{Config, ConfigError, RoleTargets};
