//! Recurring raid sessions, anchored in UTC.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::slot::{
    DaySlot, HalfHourSlot, MINUTES_PER_DAY, MINUTES_PER_WEEK, SLOT_MINUTES, Weekday,
};

/// A recurring raid window.
///
/// `day`, `start` and `end` are all UTC. An `end` earlier than `start` means
/// the session runs past midnight into the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidSession {
    /// UTC day the session starts on.
    pub day: Weekday,
    /// UTC start time (inclusive).
    #[serde(alias = "startTime")]
    pub start: HalfHourSlot,
    /// UTC end time (exclusive).
    #[serde(alias = "endTime")]
    pub end: HalfHourSlot,
}

impl RaidSession {
    /// Creates a session.
    #[must_use]
    pub const fn new(day: Weekday, start: HalfHourSlot, end: HalfHourSlot) -> Self {
        Self { day, start, end }
    }

    /// Minutes from Monday 00:00 UTC to the session start.
    #[must_use]
    pub const fn start_week_minute(&self) -> u32 {
        DaySlot::new(self.day, self.start).week_minute()
    }

    /// Length of the session in minutes.
    ///
    /// The end is bumped by a day when it falls before the start. A session
    /// whose end equals its start is empty.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        let start = self.start.minutes();
        let mut end = self.end.minutes();
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }

    /// Whether the session covers no time at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.duration_minutes() == 0
    }

    /// Whether the session crosses midnight UTC.
    #[must_use]
    pub const fn wraps_midnight(&self) -> bool {
        self.end.minutes() < self.start.minutes()
    }

    /// Whether a UTC cell lies inside `[start, end)`.
    #[must_use]
    pub const fn contains(&self, cell: DaySlot) -> bool {
        let offset =
            (cell.week_minute() + MINUTES_PER_WEEK - self.start_week_minute()) % MINUTES_PER_WEEK;
        offset < self.duration_minutes() as u32
    }

    /// Every UTC cell inside the session, in chronological order.
    ///
    /// Cells past midnight are attributed to the following day.
    pub fn cells(&self) -> impl Iterator<Item = DaySlot> + use<> {
        let start = self.start_week_minute();
        let count = u32::from(self.duration_minutes() / SLOT_MINUTES);
        (0..count).map(move |i| DaySlot::from_week_minute(start + i * u32::from(SLOT_MINUTES)))
    }

    /// Number of half-hour slots in the session.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        (self.duration_minutes() / SLOT_MINUTES) as usize
    }

    /// The UTC instant the session starts in the week beginning on `monday`.
    #[must_use]
    pub fn start_in_week(&self, monday: NaiveDate) -> DateTime<Utc> {
        week_start_utc(monday) + TimeDelta::minutes(i64::from(self.start_week_minute()))
    }

    /// The UTC instant the session ends in the week beginning on `monday`.
    #[must_use]
    pub fn end_in_week(&self, monday: NaiveDate) -> DateTime<Utc> {
        self.start_in_week(monday) + TimeDelta::minutes(i64::from(self.duration_minutes()))
    }
}

impl fmt::Display for RaidSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}-{} UTC", self.day, self.start, self.end)
    }
}

/// Midnight UTC at the start of the given date.
pub(crate) fn week_start_utc(monday: NaiveDate) -> DateTime<Utc> {
    monday.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// The guild's recurring raid schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCalendar {
    sessions: Vec<RaidSession>,
}

impl Default for SessionCalendar {
    /// Monday and Wednesday, 02:30-05:30 UTC (Sunday and Tuesday evenings on
    /// the US east coast).
    fn default() -> Self {
        let start = HalfHourSlot::containing(2 * 60 + 30);
        let end = HalfHourSlot::containing(5 * 60 + 30);
        Self::new(vec![
            RaidSession::new(Weekday::Wednesday, start, end),
            RaidSession::new(Weekday::Monday, start, end),
        ])
    }
}

impl SessionCalendar {
    /// Creates a calendar from a list of sessions.
    #[must_use]
    pub const fn new(sessions: Vec<RaidSession>) -> Self {
        Self { sessions }
    }

    /// The configured sessions, in configuration order.
    #[must_use]
    pub fn sessions(&self) -> &[RaidSession] {
        &self.sessions
    }

    /// Whether any session contains the UTC cell.
    #[must_use]
    pub fn contains(&self, cell: DaySlot) -> bool {
        self.sessions.iter().any(|session| session.contains(cell))
    }

    /// The first session containing the UTC cell.
    #[must_use]
    pub fn session_at(&self, cell: DaySlot) -> Option<&RaidSession> {
        self.sessions.iter().find(|session| session.contains(cell))
    }

    /// Number of sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the calendar has no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
