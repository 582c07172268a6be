//! Mapping between a viewer's local weekly grid and the canonical UTC grid.
//!
//! A [`SlotIndex`] is built once per timezone for a specific reference week.
//! It maps every one of the 336 local `(weekday, half-hour)` cells to the UTC
//! cell holding the same instant, and records which local cells fall inside a
//! raid session.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use chrono::{
    DateTime, Datelike, NaiveDate, Offset, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use tracing::instrument;

use crate::domain::{
    session::{RaidSession, SessionCalendar, week_start_utc},
    slot::{DaySlot, HalfHourSlot, SLOT_MINUTES, SLOTS_PER_DAY, Weekday},
};

/// Error returned when a timezone identifier is not a known IANA zone.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid timezone '{0}': expected an IANA identifier such as 'Europe/London'")]
pub struct InvalidTimezone(pub String);

/// Parses an IANA timezone identifier.
///
/// # Errors
///
/// Returns [`InvalidTimezone`] for unknown identifiers. UTC is never
/// substituted.
pub fn parse_timezone(name: &str) -> Result<Tz, InvalidTimezone> {
    Tz::from_str(name.trim()).map_err(|_| InvalidTimezone(name.to_string()))
}

/// The Monday of the fixed reference week used when no target week is given.
#[must_use]
pub fn default_reference_week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Returns the Monday of the week containing `date`.
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Bidirectional local/UTC cell mapping for one timezone and one week.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    timezone: Tz,
    week: NaiveDate,
    /// Indexed by [`DaySlot::week_index`] of the local cell.
    local_to_utc: Vec<DaySlot>,
    utc_to_local: BTreeMap<DaySlot, DaySlot>,
    raid_cells: BTreeSet<DaySlot>,
    gap_cells: BTreeSet<DaySlot>,
}

impl SlotIndex {
    /// Builds the index for a named timezone using the fixed reference week.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTimezone`] if `timezone` is not a known identifier.
    pub fn build(timezone: &str, calendar: &SessionCalendar) -> Result<Self, InvalidTimezone> {
        Ok(Self::for_week(
            parse_timezone(timezone)?,
            calendar,
            default_reference_week(),
        ))
    }

    /// Builds the index for the week containing `date`.
    ///
    /// Use this when the target week may straddle a daylight saving
    /// transition in `timezone`.
    #[must_use]
    pub fn for_date(timezone: Tz, calendar: &SessionCalendar, date: NaiveDate) -> Self {
        Self::for_week(timezone, calendar, monday_of(date))
    }

    /// Builds the index for the local week starting on `monday`.
    ///
    /// Steps through a nine day UTC window in 30 minute increments, starting
    /// one day before `monday`. Instants whose local date falls outside the
    /// week are discarded. When a local cell occurs twice (clocks going back)
    /// the earlier instant is kept. Local cells skipped by clocks going
    /// forward are mapped using the offset in force before the transition.
    #[instrument(level = "debug", skip(calendar))]
    #[must_use]
    pub fn for_week(timezone: Tz, calendar: &SessionCalendar, monday: NaiveDate) -> Self {
        let monday = monday_of(monday);
        let week_end = monday + TimeDelta::days(7);
        let window_start = week_start_utc(monday) - TimeDelta::days(1);

        let mut seen: Vec<Option<DaySlot>> = vec![None; DaySlot::week().count()];
        for step in 0..i64::from(SLOTS_PER_DAY) * 9 {
            let instant = window_start + TimeDelta::minutes(step * i64::from(SLOT_MINUTES));
            let local = instant.with_timezone(&timezone);
            let date = local.date_naive();
            if date < monday || date >= week_end {
                continue;
            }
            let entry = &mut seen[cell_at(&local).week_index()];
            if entry.is_none() {
                *entry = Some(cell_at(&instant));
            }
        }

        let mut gap_cells = BTreeSet::new();
        let local_to_utc: Vec<DaySlot> = DaySlot::week()
            .zip(seen)
            .map(|(local, utc)| {
                utc.unwrap_or_else(|| {
                    tracing::debug!("local cell {local} does not exist in {timezone}");
                    gap_cells.insert(local);
                    gap_fill(timezone, monday, local)
                })
            })
            .collect();

        let mut utc_to_local = BTreeMap::new();
        let mut raid_cells = BTreeSet::new();
        for (local, utc) in DaySlot::week().zip(local_to_utc.iter().copied()) {
            if !gap_cells.contains(&local) {
                utc_to_local.entry(utc).or_insert(local);
            }
            if calendar.contains(utc) {
                raid_cells.insert(local);
            }
        }

        Self {
            timezone,
            week: monday,
            local_to_utc,
            utc_to_local,
            raid_cells,
            gap_cells,
        }
    }

    /// The timezone this index was built for.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The Monday of the local week this index was built for.
    #[must_use]
    pub const fn week(&self) -> NaiveDate {
        self.week
    }

    /// The UTC cell for a local cell. Defined for every local cell.
    #[must_use]
    pub fn to_utc(&self, local: DaySlot) -> DaySlot {
        self.local_to_utc[local.week_index()]
    }

    /// The local cell for a UTC cell.
    ///
    /// Returns `None` for UTC cells that no local cell maps to, which happens
    /// in weeks where clocks go back. Local cells skipped by clocks going
    /// forward are never returned.
    #[must_use]
    pub fn to_local(&self, utc: DaySlot) -> Option<DaySlot> {
        self.utc_to_local.get(&utc).copied()
    }

    /// Whether the local cell falls inside a raid session.
    #[must_use]
    pub fn is_raid_cell(&self, local: DaySlot) -> bool {
        self.raid_cells.contains(&local)
    }

    /// Local cells inside a raid session, in week order.
    pub fn raid_cells(&self) -> impl Iterator<Item = DaySlot> + '_ {
        self.raid_cells.iter().copied()
    }

    /// Local cells skipped by a forward clock change during the week.
    pub fn gap_cells(&self) -> impl Iterator<Item = DaySlot> + '_ {
        self.gap_cells.iter().copied()
    }

    /// Whether a single UTC offset applies to the whole week.
    ///
    /// When this is `true` the index is valid for any other week with the
    /// same offset.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        let mut shifts = self.entries().map(|(local, utc)| {
            (i64::from(utc.week_minute()) - i64::from(local.week_minute()))
                .rem_euclid(i64::from(crate::domain::slot::MINUTES_PER_WEEK))
        });
        let first = shifts.next();
        shifts.all(|shift| Some(shift) == first)
    }

    /// Every `(local, utc)` pair, in local week order.
    pub fn entries(&self) -> impl Iterator<Item = (DaySlot, DaySlot)> + '_ {
        DaySlot::week().zip(self.local_to_utc.iter().copied())
    }

    /// Localises a session's start and end for display in this timezone.
    #[must_use]
    pub fn localize(&self, session: &RaidSession) -> LocalizedSession {
        LocalizedSession {
            start: session.start_in_week(self.week).with_timezone(&self.timezone),
            end: session.end_in_week(self.week).with_timezone(&self.timezone),
        }
    }

    /// A sorted, comma separated summary of every session in local time,
    /// e.g. `"Sun 9:30 PM - 12:30 AM, Tue 9:30 PM - 12:30 AM"`.
    #[must_use]
    pub fn localized_sessions(&self, calendar: &SessionCalendar) -> String {
        let mut labels: Vec<String> = calendar
            .sessions()
            .iter()
            .map(|session| self.localize(session).to_string())
            .collect();
        labels.sort();
        labels.join(", ")
    }
}

/// A raid session's start and end expressed in a viewer's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedSession {
    /// Local start instant.
    pub start: DateTime<Tz>,
    /// Local end instant.
    pub end: DateTime<Tz>,
}

impl LocalizedSession {
    /// Local start day.
    #[must_use]
    pub fn day(&self) -> Weekday {
        self.start.weekday().into()
    }

    /// Long label, e.g. `"Tuesday Raid"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} Raid", self.day())
    }

    /// Single letter label, e.g. `"T"`.
    #[must_use]
    pub fn short_label(&self) -> &'static str {
        self.day().narrow_name()
    }
}

impl fmt::Display for LocalizedSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%a %-I:%M %p"),
            self.end.format("%-I:%M %p")
        )
    }
}

/// A display label for a timezone at a given instant, e.g.
/// `"EST (UTC-05:00)"`.
#[must_use]
pub fn timezone_label(timezone: Tz, at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&timezone);
    let seconds = local.offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!(
        "{} (UTC{sign}{:02}:{:02})",
        local.format("%Z"),
        minutes / 60,
        minutes % 60
    )
}

/// The grid cell containing a date-time, rounding down to the half hour.
fn cell_at<T: Datelike + Timelike>(time: &T) -> DaySlot {
    #[allow(clippy::cast_possible_truncation)]
    let minutes = (time.hour() * 60 + time.minute()) as u16;
    DaySlot::new(time.weekday().into(), HalfHourSlot::containing(minutes))
}

/// Maps a local cell that never occurs (clocks went forward over it) using
/// the offset in force a day earlier.
fn gap_fill(timezone: Tz, monday: NaiveDate, local: DaySlot) -> DaySlot {
    let naive = (monday + TimeDelta::days(i64::from(local.day.index())))
        .and_time(chrono::NaiveTime::MIN)
        + TimeDelta::minutes(i64::from(local.slot.minutes()));
    let before = timezone
        .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
        .fix();
    let utc = naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
    cell_at(&utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(day: Weekday, time: &str) -> DaySlot {
        DaySlot::new(day, time.parse().unwrap())
    }

    fn tz(name: &str) -> Tz {
        parse_timezone(name).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn utc_index_is_identity() {
        let index = SlotIndex::build("UTC", &SessionCalendar::default()).unwrap();

        for local in DaySlot::week() {
            assert_eq!(index.to_utc(local), local);
            assert_eq!(index.to_local(local), Some(local));
        }
        assert!(index.is_uniform());
        assert_eq!(index.gap_cells().count(), 0);
    }

    #[test]
    fn unknown_timezone_fails() {
        let error = SlotIndex::build("Mars/Olympus_Mons", &SessionCalendar::default())
            .unwrap_err();
        assert_eq!(error, InvalidTimezone("Mars/Olympus_Mons".to_string()));

        assert!(parse_timezone("").is_err());
    }

    #[test]
    fn mapping_is_total_for_extreme_offsets() {
        for name in [
            "America/New_York",
            "Pacific/Kiritimati",
            "Pacific/Pago_Pago",
            "Asia/Kathmandu",
            "Australia/Lord_Howe",
            "Asia/Kolkata",
        ] {
            let index = SlotIndex::build(name, &SessionCalendar::default()).unwrap();
            assert_eq!(index.entries().count(), 336, "{name}");
            let distinct: BTreeSet<_> = index.entries().map(|(_, utc)| utc).collect();
            assert_eq!(distinct.len(), 336, "{name} should be injective in January");
        }
    }

    #[test]
    fn new_york_evening_maps_to_next_utc_day() {
        let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();

        assert_eq!(
            index.to_utc(cell(Weekday::Tuesday, "21:30")),
            cell(Weekday::Wednesday, "02:30")
        );
        assert_eq!(
            index.to_local(cell(Weekday::Wednesday, "02:30")),
            Some(cell(Weekday::Tuesday, "21:30"))
        );
        // Sunday evening local wraps to Monday UTC.
        assert_eq!(
            index.to_utc(cell(Weekday::Sunday, "23:30")),
            cell(Weekday::Monday, "04:30")
        );
    }

    #[test]
    fn raid_cells_follow_the_viewer_timezone() {
        let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();

        let raid: Vec<_> = index.raid_cells().collect();
        assert_eq!(raid.len(), 12);
        assert!(index.is_raid_cell(cell(Weekday::Tuesday, "21:30")));
        assert!(index.is_raid_cell(cell(Weekday::Wednesday, "00:00")));
        assert!(!index.is_raid_cell(cell(Weekday::Wednesday, "00:30")));
        assert!(index.is_raid_cell(cell(Weekday::Sunday, "23:00")));
    }

    #[test]
    fn raid_cells_for_session_crossing_midnight() {
        let session = RaidSession::new(
            Weekday::Wednesday,
            "23:30".parse().unwrap(),
            "01:30".parse().unwrap(),
        );
        let calendar = SessionCalendar::new(vec![session]);
        let index = SlotIndex::build("UTC", &calendar).unwrap();

        assert!(index.is_raid_cell(cell(Weekday::Thursday, "00:30")));
        assert_eq!(index.raid_cells().count(), 4);
    }

    #[test]
    fn half_hour_and_three_quarter_offsets_are_floored() {
        let index = SlotIndex::build("Asia/Kathmandu", &SessionCalendar::default()).unwrap();

        // 00:00 UTC is 05:45 local.
        assert_eq!(
            index.to_utc(cell(Weekday::Monday, "05:30")),
            cell(Weekday::Monday, "00:00")
        );
    }

    #[test]
    fn spring_forward_gap_is_filled_with_previous_offset() {
        // Clocks go forward at 02:00 on Sunday 10 March 2024 in New York.
        let index = SlotIndex::for_date(
            tz("America/New_York"),
            &SessionCalendar::default(),
            date(2024, 3, 6),
        );

        assert_eq!(index.week(), date(2024, 3, 4));
        assert!(!index.is_uniform());
        let gaps: Vec<_> = index.gap_cells().collect();
        assert_eq!(
            gaps,
            vec![cell(Weekday::Sunday, "02:00"), cell(Weekday::Sunday, "02:30")]
        );
        assert_eq!(
            index.to_utc(cell(Weekday::Sunday, "02:00")),
            cell(Weekday::Sunday, "07:00")
        );
        // 03:00 EDT is the same instant, and it is the cell that exists.
        assert_eq!(
            index.to_utc(cell(Weekday::Sunday, "03:00")),
            cell(Weekday::Sunday, "07:00")
        );
        assert_eq!(
            index.to_local(cell(Weekday::Sunday, "07:00")),
            Some(cell(Weekday::Sunday, "03:00"))
        );
        assert_eq!(
            index.to_local(cell(Weekday::Sunday, "07:30")),
            Some(cell(Weekday::Sunday, "03:30"))
        );
        // After the change the offset is -4.
        assert_eq!(
            index.to_utc(cell(Weekday::Sunday, "21:30")),
            cell(Weekday::Monday, "01:30")
        );
        // Before the change the offset is -5.
        assert_eq!(
            index.to_utc(cell(Weekday::Monday, "00:00")),
            cell(Weekday::Monday, "05:00")
        );
        assert_eq!(index.entries().count(), 336);
    }

    #[test]
    fn fall_back_keeps_the_earlier_instant() {
        // Clocks go back at 02:00 on Sunday 3 November 2024 in New York.
        let index = SlotIndex::for_date(
            tz("America/New_York"),
            &SessionCalendar::default(),
            date(2024, 11, 3),
        );

        assert_eq!(index.week(), date(2024, 10, 28));
        assert_eq!(
            index.to_utc(cell(Weekday::Sunday, "01:00")),
            cell(Weekday::Sunday, "05:00")
        );
        assert_eq!(index.to_local(cell(Weekday::Sunday, "06:00")), None);
        assert_eq!(index.gap_cells().count(), 0);
    }

    #[test]
    fn localizes_sessions() {
        let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();
        let session = SessionCalendar::default().sessions()[0];

        let localized = index.localize(&session);
        assert_eq!(localized.day(), Weekday::Tuesday);
        assert_eq!(localized.label(), "Tuesday Raid");
        assert_eq!(localized.short_label(), "T");
        assert_eq!(localized.to_string(), "Tue 9:30 PM - 12:30 AM");

        assert_eq!(
            index.localized_sessions(&SessionCalendar::default()),
            "Sun 9:30 PM - 12:30 AM, Tue 9:30 PM - 12:30 AM"
        );
    }

    #[test]
    fn labels_timezones_with_offset() {
        let winter = date(2024, 1, 15).and_hms_opt(12, 0, 0).unwrap().and_utc();
        assert_eq!(
            timezone_label(tz("America/New_York"), winter),
            "EST (UTC-05:00)"
        );
        assert_eq!(timezone_label(tz("Asia/Kolkata"), winter), "IST (UTC+05:30)");
    }
}
