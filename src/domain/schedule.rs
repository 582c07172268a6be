use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::slot::{DaySlot, HalfHourSlot, SlotError, Weekday};

/// A player's weekly availability, in UTC.
///
/// Maps a UTC weekday to the set of UTC half-hour slots the player marked as
/// available. A missing day means no availability on that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule", into = "RawSchedule")]
pub struct Schedule {
    days: BTreeMap<Weekday, BTreeSet<HalfHourSlot>>,
}

/// The wire shape of a schedule: weekday name to a list of `HH:MM` strings.
pub type RawSchedule = BTreeMap<String, Vec<String>>;

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw submission data into a schedule.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown weekday name or misaligned / out of range
    /// time. Nothing is dropped silently.
    pub fn from_raw(raw: &RawSchedule) -> Result<Self, SlotError> {
        let mut schedule = Self::new();
        for (day, times) in raw {
            let day: Weekday = day.parse()?;
            for time in times {
                schedule.insert(DaySlot::new(day, time.parse()?));
            }
        }
        Ok(schedule)
    }

    /// Marks a UTC cell as available.
    pub fn insert(&mut self, cell: DaySlot) -> bool {
        self.days.entry(cell.day).or_default().insert(cell.slot)
    }

    /// Clears a UTC cell. Empty days are removed.
    pub fn remove(&mut self, cell: DaySlot) -> bool {
        let Some(slots) = self.days.get_mut(&cell.day) else {
            return false;
        };
        let removed = slots.remove(&cell.slot);
        if slots.is_empty() {
            self.days.remove(&cell.day);
        }
        removed
    }

    /// Whether the UTC cell is marked available.
    #[must_use]
    pub fn contains(&self, cell: DaySlot) -> bool {
        self.days
            .get(&cell.day)
            .is_some_and(|slots| slots.contains(&cell.slot))
    }

    /// The available slots on a UTC day, possibly empty.
    pub fn slots_on(&self, day: Weekday) -> impl Iterator<Item = HalfHourSlot> + '_ {
        self.days.get(&day).into_iter().flatten().copied()
    }

    /// Every available UTC cell, in week order.
    pub fn cells(&self) -> impl Iterator<Item = DaySlot> + '_ {
        self.days
            .iter()
            .flat_map(|(day, slots)| slots.iter().map(|slot| DaySlot::new(*day, *slot)))
    }

    /// Total number of available cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    /// Whether no cell is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeSet::is_empty)
    }
}

impl FromIterator<DaySlot> for Schedule {
    fn from_iter<T: IntoIterator<Item = DaySlot>>(iter: T) -> Self {
        let mut schedule = Self::new();
        for cell in iter {
            schedule.insert(cell);
        }
        schedule
    }
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = SlotError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::from_raw(&raw)
    }
}

impl From<Schedule> for RawSchedule {
    fn from(schedule: Schedule) -> Self {
        schedule
            .days
            .into_iter()
            .map(|(day, slots)| {
                (
                    day.name().to_string(),
                    slots.into_iter().map(|slot| slot.to_string()).collect(),
                )
            })
            .collect()
    }
}

/// A player's availability submission: their IANA timezone and UTC schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// IANA timezone identifier the player filled the grid in, e.g.
    /// `America/New_York`.
    pub timezone: String,
    /// Availability in UTC.
    #[serde(default)]
    pub schedule: Schedule,
}
