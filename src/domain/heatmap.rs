//! Aggregated availability across players.
//!
//! Aggregation happens in UTC space. The same [`Heatmap`] is read through a
//! [`SlotIndex`] to display it in any viewer's timezone.

use std::collections::{BTreeMap, BTreeSet};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::instrument;

use crate::domain::{
    schedule::Schedule,
    slot::{DaySlot, HalfHourSlot, Weekday},
    timezone::SlotIndex,
};

/// Something with an identity, a name and a UTC schedule that can be
/// aggregated.
pub trait Participant: Sync {
    /// Stable identifier. Two participants may share a name but not an id.
    fn id(&self) -> &str;
    /// Display name listed in cell details.
    fn name(&self) -> &str;
    /// UTC availability.
    fn schedule(&self) -> &Schedule;
}

/// A named schedule, identified by its name.
impl<N: AsRef<str> + Sync> Participant for (N, Schedule) {
    fn id(&self) -> &str {
        self.0.as_ref()
    }

    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn schedule(&self) -> &Schedule {
        &self.1
    }
}

/// An `(id, name, schedule)` triple.
impl<I: AsRef<str> + Sync, N: AsRef<str> + Sync> Participant for (I, N, Schedule) {
    fn id(&self) -> &str {
        self.0.as_ref()
    }

    fn name(&self) -> &str {
        self.1.as_ref()
    }

    fn schedule(&self) -> &Schedule {
        &self.2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Member {
    id: String,
    name: String,
}

/// Participant counts per UTC cell, with the names behind each count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    cells: BTreeMap<DaySlot, Vec<Member>>,
    players: Vec<Member>,
}

/// One UTC cell of the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// UTC day.
    pub day: Weekday,
    /// UTC time.
    pub time: HalfHourSlot,
    /// Number of available players.
    pub count: usize,
    /// Available players, in aggregation order.
    pub names: Vec<String>,
}

/// Count and names for one cell, as seen by a viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellDetails {
    /// Number of available players.
    pub count: usize,
    /// Available players, in aggregation order.
    pub names: Vec<String>,
}

impl Heatmap {
    /// Aggregates every participant's schedule.
    ///
    /// Schedules are folded in parallel; name lists keep the order of
    /// `participants`.
    #[instrument(level = "debug", skip_all, fields(participants = participants.len()))]
    pub fn aggregate<P: Participant>(participants: &[P]) -> Self {
        participants
            .par_iter()
            .map(|participant| {
                let mut heatmap = Self::default();
                heatmap.add(participant);
                heatmap
            })
            .reduce(Self::default, Self::merge)
    }

    /// Adds one participant.
    ///
    /// Returns `false`, leaving the heatmap unchanged, if a participant with
    /// the same id is already present.
    pub fn add<P: Participant + ?Sized>(&mut self, participant: &P) -> bool {
        if self.contains(participant.id()) {
            return false;
        }
        let member = Member {
            id: participant.id().to_string(),
            name: participant.name().to_string(),
        };
        for cell in participant.schedule().cells() {
            self.cells.entry(cell).or_default().push(member.clone());
        }
        self.players.push(member);
        true
    }

    /// Removes the participant with the given id.
    ///
    /// Returns `false` if no participant had that id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|member| member.id != id);
        if self.players.len() == before {
            return false;
        }
        self.cells.retain(|_, members| {
            members.retain(|member| member.id != id);
            !members.is_empty()
        });
        true
    }

    /// Whether a participant with the given id has been aggregated.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|member| member.id == id)
    }

    /// Appends `other`, keeping the first participant seen for each id.
    fn merge(mut self, other: Self) -> Self {
        let duplicates: BTreeSet<String> = {
            let known: BTreeSet<&str> = self.players.iter().map(|m| m.id.as_str()).collect();
            other
                .players
                .iter()
                .filter(|member| known.contains(member.id.as_str()))
                .map(|member| member.id.clone())
                .collect()
        };
        if !duplicates.is_empty() {
            tracing::debug!("ignoring duplicate participants: {duplicates:?}");
        }

        let fresh = |member: &Member| !duplicates.contains(&member.id);
        self.players
            .extend(other.players.into_iter().filter(|member| fresh(member)));
        for (cell, members) in other.cells {
            let members: Vec<_> = members.into_iter().filter(|member| fresh(member)).collect();
            if !members.is_empty() {
                self.cells.entry(cell).or_default().extend(members);
            }
        }
        self
    }

    /// Number of participants aggregated.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The aggregate for a UTC cell.
    #[must_use]
    pub fn cell(&self, utc: DaySlot) -> HeatmapCell {
        let names = self.names(utc);
        HeatmapCell {
            day: utc.day,
            time: utc.slot,
            count: names.len(),
            names,
        }
    }

    fn members(&self, utc: DaySlot) -> &[Member] {
        self.cells
            .get(&utc)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names available in a UTC cell, in aggregation order.
    #[must_use]
    pub fn names(&self, utc: DaySlot) -> Vec<String> {
        self.members(utc)
            .iter()
            .map(|member| member.name.clone())
            .collect()
    }

    /// Number of participants available in a UTC cell.
    #[must_use]
    pub fn count(&self, utc: DaySlot) -> usize {
        self.members(utc).len()
    }

    /// Every non-empty UTC cell, in week order.
    pub fn cells(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        self.cells.keys().map(|cell| self.cell(*cell))
    }

    /// Details for a viewer's local cell.
    #[must_use]
    pub fn details_for(&self, local: DaySlot, index: &SlotIndex) -> CellDetails {
        let names = self.names(index.to_utc(local));
        CellDetails {
            count: names.len(),
            names,
        }
    }

    /// The largest count of any cell.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.cells.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Shading bucket for a count relative to the number of participants.
    #[must_use]
    pub fn intensity(&self, count: usize) -> Intensity {
        Intensity::of(count, self.player_count())
    }

    /// Lays the heatmap out on a viewer's grid.
    #[must_use]
    pub fn grid(&self, index: &SlotIndex) -> Vec<GridRow> {
        Weekday::ALL
            .into_iter()
            .map(|display_day| GridRow {
                day: display_day,
                cells: display_columns()
                    .map(|time| {
                        let local = DaySlot::new(actual_day(display_day, time), time);
                        let details = self.details_for(local, index);
                        GridCell {
                            local,
                            raid: index.is_raid_cell(local),
                            intensity: self.intensity(details.count),
                            count: details.count,
                            names: details.names,
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Relative shading bucket for a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Nobody is available.
    Empty,
    /// Under 20% of participants.
    Low,
    /// 20% to under 40%.
    Moderate,
    /// 40% to under 60%.
    Medium,
    /// 60% to under 80%.
    High,
    /// 80% or more.
    Peak,
}

impl Intensity {
    /// Buckets `count` out of `total` participants. A `total` of zero is
    /// treated as one.
    #[must_use]
    pub fn of(count: usize, total: usize) -> Self {
        if count == 0 {
            return Self::Empty;
        }
        // Compare count / total against fifths without floating point.
        let scaled = count * 5;
        let total = total.max(1);
        if scaled < total {
            Self::Low
        } else if scaled < total * 2 {
            Self::Moderate
        } else if scaled < total * 3 {
            Self::Medium
        } else if scaled < total * 4 {
            Self::High
        } else {
            Self::Peak
        }
    }
}

/// One display row of the viewer grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    /// The row label. Columns before noon belong to the following day.
    pub day: Weekday,
    /// 48 cells, starting at 12:00.
    pub cells: Vec<GridCell>,
}

/// One cell of the viewer grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// The actual local cell shown.
    pub local: DaySlot,
    /// Whether the cell falls in a raid session.
    pub raid: bool,
    /// Shading bucket.
    pub intensity: Intensity,
    /// Number of available players.
    pub count: usize,
    /// Available players.
    pub names: Vec<String>,
}

/// Grid columns: 12:00 through 23:30, then 00:00 through 11:30.
pub fn display_columns() -> impl Iterator<Item = HalfHourSlot> {
    HalfHourSlot::all()
        .skip(24)
        .chain(HalfHourSlot::all().take(24))
}

/// The calendar day shown in a display row's column.
///
/// A row runs from noon to noon, so times before 12:00 belong to the next
/// day.
#[must_use]
pub const fn actual_day(display_day: Weekday, time: HalfHourSlot) -> Weekday {
    if time.hour() < 12 {
        display_day.succ()
    } else {
        display_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionCalendar;

    fn cell(day: Weekday, time: &str) -> DaySlot {
        DaySlot::new(day, time.parse().unwrap())
    }

    fn player(name: &str, cells: &[(Weekday, &str)]) -> (String, Schedule) {
        (
            name.to_string(),
            cells.iter().map(|(day, time)| cell(*day, time)).collect(),
        )
    }

    fn roster() -> Vec<(String, Schedule)> {
        vec![
            player(
                "Alice",
                &[(Weekday::Wednesday, "02:30"), (Weekday::Wednesday, "03:00")],
            ),
            player("Bob", &[(Weekday::Wednesday, "02:30")]),
        ]
    }

    #[test]
    fn counts_and_names_per_utc_cell() {
        let heatmap = Heatmap::aggregate(&roster());

        assert_eq!(heatmap.player_count(), 2);
        let raid_start = heatmap.cell(cell(Weekday::Wednesday, "02:30"));
        assert_eq!(raid_start.count, 2);
        assert_eq!(raid_start.names, vec!["Alice", "Bob"]);
        assert_eq!(heatmap.count(cell(Weekday::Wednesday, "03:00")), 1);
        assert_eq!(heatmap.count(cell(Weekday::Monday, "03:00")), 0);
        assert_eq!(heatmap.max_count(), 2);
    }

    #[test]
    fn parallel_aggregation_preserves_input_order() {
        let players: Vec<_> = (0..200)
            .map(|i| player(&format!("p{i:03}"), &[(Weekday::Friday, "20:00")]))
            .collect();

        let heatmap = Heatmap::aggregate(&players);
        let expected: Vec<_> = players.iter().map(|(name, _)| name.clone()).collect();

        assert_eq!(heatmap.names(cell(Weekday::Friday, "20:00")), expected);
    }

    #[test]
    fn adding_then_removing_a_player_is_a_no_op() {
        let base = Heatmap::aggregate(&roster());

        let mut heatmap = base.clone();
        let (name, schedule) = player(
            "Carol",
            &[(Weekday::Wednesday, "02:30"), (Weekday::Sunday, "18:00")],
        );
        assert!(heatmap.add(&(name, schedule)));
        assert_eq!(heatmap.count(cell(Weekday::Wednesday, "02:30")), 3);

        assert!(heatmap.remove("Carol"));
        assert_eq!(heatmap, base);
        assert!(!heatmap.remove("Carol"));
    }

    #[test]
    fn players_sharing_a_name_are_tracked_by_id() {
        let wednesday = [(Weekday::Wednesday, "02:30")];
        let sam = |id: &str| {
            let (_, schedule) = player("Sam", &wednesday);
            (id.to_string(), "Sam".to_string(), schedule)
        };
        let (_, bob) = player("Bob", &wednesday);
        let base = Heatmap::aggregate(&[sam("sam-1"), ("bob".to_string(), "Bob".to_string(), bob)]);

        let mut heatmap = base.clone();
        assert!(heatmap.add(&sam("sam-2")));
        assert_eq!(heatmap.player_count(), 3);
        assert_eq!(
            heatmap.names(cell(Weekday::Wednesday, "02:30")),
            vec!["Sam", "Bob", "Sam"]
        );

        assert!(heatmap.remove("sam-2"));
        assert_eq!(heatmap, base);
        assert!(heatmap.contains("sam-1"));
    }

    #[test]
    fn aggregation_keeps_the_first_participant_for_each_id() {
        let players = vec![
            player("Bob", &[(Weekday::Monday, "20:00")]),
            player("Alice", &[(Weekday::Monday, "20:00")]),
            player("Bob", &[(Weekday::Tuesday, "20:00")]),
        ];

        let heatmap = Heatmap::aggregate(&players);

        assert_eq!(heatmap.player_count(), 2);
        assert_eq!(heatmap.names(cell(Weekday::Monday, "20:00")), vec!["Bob", "Alice"]);
        assert_eq!(heatmap.count(cell(Weekday::Tuesday, "20:00")), 0);
    }

    #[test]
    fn adding_the_same_id_twice_is_rejected() {
        let mut heatmap = Heatmap::aggregate(&roster());
        let (name, schedule) = player("Bob", &[(Weekday::Sunday, "18:00")]);

        assert!(!heatmap.add(&(name, schedule)));
        assert_eq!(heatmap, Heatmap::aggregate(&roster()));
    }

    #[test]
    fn viewer_details_go_through_the_index() {
        let heatmap = Heatmap::aggregate(&roster());
        let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();

        let details = heatmap.details_for(cell(Weekday::Tuesday, "21:30"), &index);
        assert_eq!(details.count, 2);
        assert_eq!(details.names, vec!["Alice", "Bob"]);

        let empty = heatmap.details_for(cell(Weekday::Wednesday, "02:30"), &index);
        assert_eq!(empty, CellDetails::default());
    }

    #[test]
    fn intensity_buckets() {
        assert_eq!(Intensity::of(0, 10), Intensity::Empty);
        assert_eq!(Intensity::of(1, 10), Intensity::Low);
        assert_eq!(Intensity::of(2, 10), Intensity::Moderate);
        assert_eq!(Intensity::of(5, 10), Intensity::Medium);
        assert_eq!(Intensity::of(7, 10), Intensity::High);
        assert_eq!(Intensity::of(8, 10), Intensity::Peak);
        assert_eq!(Intensity::of(1, 0), Intensity::Peak);
    }

    #[test]
    fn grid_rows_run_noon_to_noon() {
        let columns: Vec<_> = display_columns().collect();
        assert_eq!(columns.len(), 48);
        assert_eq!(columns[0].to_string(), "12:00");
        assert_eq!(columns[24].to_string(), "00:00");

        let heatmap = Heatmap::aggregate(&roster());
        let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();
        let grid = heatmap.grid(&index);

        assert_eq!(grid.len(), 7);
        let tuesday = &grid[1];
        assert_eq!(tuesday.day, Weekday::Tuesday);
        // 21:30 is column 19.
        let evening = &tuesday.cells[19];
        assert_eq!(evening.local, cell(Weekday::Tuesday, "21:30"));
        assert!(evening.raid);
        assert_eq!(evening.count, 2);
        assert_eq!(evening.intensity, Intensity::Peak);
        // 00:00 on the Tuesday row is Wednesday.
        assert_eq!(tuesday.cells[24].local, cell(Weekday::Wednesday, "00:00"));
    }
}
