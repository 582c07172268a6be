use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of half-hour slots in a day.
pub const SLOTS_PER_DAY: u16 = 48;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes in a week.
pub const MINUTES_PER_WEEK: u32 = 7 * MINUTES_PER_DAY as u32;

/// Width of a slot in minutes.
pub const SLOT_MINUTES: u16 = 30;

/// A day of the week.
///
/// Days are ordered Monday first, matching the order rows are displayed in.
/// Whether a value is UTC-anchored or local depends on where it appears; the
/// type carries no timezone of its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based index, Monday is 0.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the day for a zero-based index, wrapping modulo 7.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// The following day.
    #[must_use]
    pub const fn succ(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The preceding day.
    #[must_use]
    pub const fn pred(self) -> Self {
        Self::from_index(self.index() + 6)
    }

    /// Full English name, e.g. `"Wednesday"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Three letter abbreviation, e.g. `"Wed"`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Single letter label, e.g. `"W"`.
    #[must_use]
    pub fn narrow_name(self) -> &'static str {
        &self.name()[..1]
    }
}

impl From<chrono::Weekday> for Weekday {
    #[allow(clippy::cast_possible_truncation)]
    fn from(day: chrono::Weekday) -> Self {
        Self::from_index(day.num_days_from_monday() as u8)
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = SlotError;

    /// Accepts full or three letter names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == lower || name[..3] == lower
            })
            .ok_or_else(|| SlotError::UnknownWeekday(s.to_string()))
    }
}

/// Errors raised when ingesting raw schedule data.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotError {
    /// A time that is not `HH:MM`, is out of range, or is not aligned to a
    /// 30 minute boundary.
    #[error("malformed schedule slot '{0}': expected a 30 minute aligned HH:MM between 00:00 and 23:30")]
    MalformedScheduleSlot(String),

    /// A day name that is not one of the seven weekdays.
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),
}

/// A time of day quantised to a 30 minute boundary.
///
/// There are 48 slots per day, `00:00` through `23:30`. Displayed and parsed
/// as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfHourSlot(u8);

impl HalfHourSlot {
    /// Creates a slot from its zero-based index within the day.
    ///
    /// Returns `None` if `index >= 48`.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < SLOTS_PER_DAY as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Creates a slot from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::MalformedScheduleSlot`] if the minute is not on a
    /// 30 minute boundary or is outside the day.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_minutes(minutes: u16) -> Result<Self, SlotError> {
        if minutes % SLOT_MINUTES != 0 || minutes >= MINUTES_PER_DAY {
            return Err(SlotError::MalformedScheduleSlot(format!(
                "{:02}:{:02}",
                minutes / 60,
                minutes % 60
            )));
        }
        Ok(Self((minutes / SLOT_MINUTES) as u8))
    }

    /// Returns the slot containing the given minute of the day, rounding down.
    ///
    /// Minutes past the end of the day wrap around.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn containing(minutes: u16) -> Self {
        Self(((minutes % MINUTES_PER_DAY) / SLOT_MINUTES) as u8)
    }

    /// Every slot of the day, in order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..SLOTS_PER_DAY as u8).map(Self)
    }

    /// Zero-based index within the day.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0 as u16 * SLOT_MINUTES
    }

    /// Hour of day, `0..24`.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.0 / 2
    }

    /// Minute of the hour, either 0 or 30.
    #[must_use]
    pub const fn minute(self) -> u8 {
        (self.0 % 2) * 30
    }

    /// Whether this slot starts on the hour.
    #[must_use]
    pub const fn is_hour_start(self) -> bool {
        self.0 % 2 == 0
    }
}

impl fmt::Display for HalfHourSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for HalfHourSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SlotError::MalformedScheduleSlot(s.to_string());

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        let hours: u16 = hours.parse().map_err(|_| malformed())?;
        let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
        if hours >= 24 || minutes >= 60 {
            return Err(malformed());
        }

        Self::from_minutes(hours * 60 + minutes).map_err(|_| malformed())
    }
}

impl TryFrom<&str> for HalfHourSlot {
    type Error = SlotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for HalfHourSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HalfHourSlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A `(weekday, half-hour)` cell of the weekly grid.
///
/// Whether it is a UTC or a local cell depends on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DaySlot {
    /// Day of the week.
    pub day: Weekday,
    /// Half-hour slot within the day.
    pub slot: HalfHourSlot,
}

impl DaySlot {
    /// Creates a cell.
    #[must_use]
    pub const fn new(day: Weekday, slot: HalfHourSlot) -> Self {
        Self { day, slot }
    }

    /// Builds the cell containing the given minute of the week (Monday 00:00
    /// is minute 0). Values wrap around the week.
    #[must_use]
    pub const fn from_week_minute(minute: u32) -> Self {
        let minute = minute % MINUTES_PER_WEEK;
        #[allow(clippy::cast_possible_truncation)]
        let day = Weekday::from_index((minute / MINUTES_PER_DAY as u32) as u8);
        #[allow(clippy::cast_possible_truncation)]
        let slot = HalfHourSlot::containing((minute % MINUTES_PER_DAY as u32) as u16);
        Self { day, slot }
    }

    /// Minutes since Monday 00:00 of the same week.
    #[must_use]
    pub const fn week_minute(self) -> u32 {
        self.day.index() as u32 * MINUTES_PER_DAY as u32 + self.slot.minutes() as u32
    }

    /// Position of the cell in [`DaySlot::week`] order, `0..336`.
    #[must_use]
    pub const fn week_index(self) -> usize {
        self.day.index() as usize * SLOTS_PER_DAY as usize + self.slot.index() as usize
    }

    /// All 336 cells of the week, Monday 00:00 first.
    pub fn week() -> impl Iterator<Item = Self> {
        Weekday::ALL
            .into_iter()
            .flat_map(|day| HalfHourSlot::all().map(move |slot| Self::new(day, slot)))
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.day, self.slot)
    }
}
