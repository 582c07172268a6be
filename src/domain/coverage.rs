//! Per-player, per-session availability classification.

use std::fmt;

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{
    schedule::Schedule,
    session::{RaidSession, SessionCalendar},
    slot::SLOT_MINUTES,
    timezone::SlotIndex,
};

/// How much of a session a player can attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// No slot of the session is available.
    None,
    /// Some, but not all, slots are available.
    Partial,
    /// Every slot is available.
    Full,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Partial => "partial",
            Self::Full => "full",
        })
    }
}

/// A contiguous stretch of availability inside a session, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRange {
    /// Local start (inclusive).
    pub start: DateTime<Tz>,
    /// Local end (exclusive).
    pub end: DateTime<Tz>,
}

impl fmt::Display for AvailabilityRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%-I:%M %p"),
            self.end.format("%-I:%M %p")
        )
    }
}

impl Serialize for AvailabilityRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A player's coverage of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCoverage {
    /// The session assessed.
    pub session: RaidSession,
    /// Overall classification.
    pub status: CoverageStatus,
    /// Number of session slots the player marked available.
    pub available: usize,
    /// Number of slots in the session.
    pub total: usize,
    /// Available stretches inside the session, in local time.
    pub ranges: Vec<AvailabilityRange>,
    /// Whether the player has any availability on the day(s) the session
    /// touches.
    pub day_available: bool,
}

impl SessionCoverage {
    /// Classifies a schedule against a session.
    ///
    /// Ranges are expressed in the index's timezone, using the index's week.
    #[must_use]
    pub fn assess(schedule: &Schedule, session: &RaidSession, index: &SlotIndex) -> Self {
        let start = session.start_in_week(index.week());
        let step = TimeDelta::minutes(i64::from(SLOT_MINUTES));

        let mut available = 0;
        let mut ranges: Vec<AvailabilityRange> = Vec::new();
        let mut offset = TimeDelta::zero();
        for cell in session.cells() {
            let slot_start = (start + offset).with_timezone(&index.timezone());
            offset += step;
            if !schedule.contains(cell) {
                continue;
            }
            available += 1;
            match ranges.last_mut() {
                Some(range) if range.end == slot_start => range.end = slot_start + step,
                _ => ranges.push(AvailabilityRange {
                    start: slot_start,
                    end: slot_start + step,
                }),
            }
        }

        let total = session.slot_count();
        let status = if available == 0 {
            CoverageStatus::None
        } else if available == total {
            CoverageStatus::Full
        } else {
            CoverageStatus::Partial
        };

        let mut days = vec![session.day];
        if session.wraps_midnight() {
            days.push(session.day.succ());
        }
        let day_available = days
            .into_iter()
            .any(|day| schedule.slots_on(day).next().is_some());

        Self {
            session: *session,
            status,
            available,
            total,
            ranges,
            day_available,
        }
    }

    /// Assesses every session of a calendar, in calendar order.
    #[must_use]
    pub fn for_calendar(
        schedule: &Schedule,
        calendar: &SessionCalendar,
        index: &SlotIndex,
    ) -> Vec<Self> {
        calendar
            .sessions()
            .iter()
            .map(|session| Self::assess(schedule, session, index))
            .collect()
    }
}

impl fmt::Display for SessionCoverage {
    /// A one line description suitable for a tooltip.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.day_available {
            return f.write_str("Not available");
        }
        if self.ranges.is_empty() {
            return f.write_str("No overlap with raid time");
        }
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slot::{DaySlot, Weekday};

    fn cell(day: Weekday, time: &str) -> DaySlot {
        DaySlot::new(day, time.parse().unwrap())
    }

    fn raid() -> RaidSession {
        RaidSession::new(
            Weekday::Wednesday,
            "02:30".parse().unwrap(),
            "05:30".parse().unwrap(),
        )
    }

    fn utc() -> SlotIndex {
        SlotIndex::build("UTC", &SessionCalendar::default()).unwrap()
    }

    fn schedule(times: &[&str]) -> Schedule {
        times
            .iter()
            .map(|time| cell(Weekday::Wednesday, time))
            .collect()
    }

    #[test]
    fn all_slots_is_full() {
        let schedule = schedule(&["02:30", "03:00", "03:30", "04:00", "04:30", "05:00"]);
        let coverage = SessionCoverage::assess(&schedule, &raid(), &utc());

        assert_eq!(coverage.status, CoverageStatus::Full);
        assert_eq!(coverage.available, 6);
        assert_eq!(coverage.total, 6);
        assert_eq!(coverage.to_string(), "2:30 AM - 5:30 AM");
    }

    #[test]
    fn half_the_slots_is_partial() {
        let schedule = schedule(&["02:30", "03:00", "04:30"]);
        let coverage = SessionCoverage::assess(&schedule, &raid(), &utc());

        assert_eq!(coverage.status, CoverageStatus::Partial);
        assert_eq!(coverage.available, 3);
        assert_eq!(coverage.ranges.len(), 2);
        assert_eq!(coverage.to_string(), "2:30 AM - 3:30 AM, 4:30 AM - 5:00 AM");
    }

    #[test]
    fn empty_schedule_is_none() {
        let coverage = SessionCoverage::assess(&Schedule::new(), &raid(), &utc());

        assert_eq!(coverage.status, CoverageStatus::None);
        assert!(coverage.ranges.is_empty());
        assert_eq!(coverage.to_string(), "Not available");
    }

    #[test]
    fn slots_outside_the_session_do_not_count() {
        let schedule = schedule(&["00:00", "06:00"]);
        let coverage = SessionCoverage::assess(&schedule, &raid(), &utc());

        assert_eq!(coverage.status, CoverageStatus::None);
        assert_eq!(coverage.to_string(), "No overlap with raid time");
    }

    #[test]
    fn wrapping_session_reads_the_next_day() {
        let session = RaidSession::new(
            Weekday::Wednesday,
            "23:30".parse().unwrap(),
            "01:30".parse().unwrap(),
        );
        let schedule: Schedule = [
            cell(Weekday::Wednesday, "23:30"),
            cell(Weekday::Thursday, "00:00"),
            cell(Weekday::Thursday, "00:30"),
            cell(Weekday::Thursday, "01:00"),
        ]
        .into_iter()
        .collect();

        let coverage = SessionCoverage::assess(&schedule, &session, &utc());
        assert_eq!(coverage.status, CoverageStatus::Full);
        assert_eq!(coverage.ranges.len(), 1);
    }

    #[test]
    fn new_york_player_missing_the_last_slot_is_partial() {
        let index =
            SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();
        let schedule = schedule(&["02:30", "03:00", "03:30", "04:00", "04:30"]);

        let coverage = SessionCoverage::assess(&schedule, &raid(), &index);

        assert_eq!(coverage.status, CoverageStatus::Partial);
        assert_eq!(coverage.available, 5);
        assert_eq!(coverage.to_string(), "9:30 PM - 12:00 AM");
    }

    #[test]
    fn covers_every_calendar_session() {
        let schedule = schedule(&["02:30"]);
        let coverage =
            SessionCoverage::for_calendar(&schedule, &SessionCalendar::default(), &utc());

        let statuses: Vec<_> = coverage.iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec![CoverageStatus::Partial, CoverageStatus::None]);
    }
}
