//! Players, the pool they are drawn from, and the raid roster itself.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::{
    classes::{self, Role},
    heatmap::Participant,
    schedule::{Availability, Schedule},
};

/// How committed a player is to raiding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Involvement {
    /// Raids every session.
    Core,
    /// Fills in when needed.
    Fill,
    /// Only joins heroic difficulty.
    HeroicOnly,
    /// Anything else the submission form produced.
    Other(String),
}

impl Involvement {
    const fn rank(&self) -> u8 {
        match self {
            Self::Core => 0,
            Self::Fill => 1,
            Self::HeroicOnly => 2,
            Self::Other(_) => 3,
        }
    }
}

impl PartialOrd for Involvement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Involvement {
    /// `Core`, `Fill`, `Heroic Only`, then everything else (alphabetically).
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.cmp(b),
            _ => Ordering::Equal,
        })
    }
}

impl From<String> for Involvement {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "core" => Self::Core,
            "fill" => Self::Fill,
            "heroic" | "heroic only" | "heroic_only" => Self::HeroicOnly,
            _ => Self::Other(value),
        }
    }
}

impl From<Involvement> for String {
    fn from(value: Involvement) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Involvement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Core => "Core",
            Self::Fill => "Fill",
            Self::HeroicOnly => "Heroic Only",
            Self::Other(other) => other,
        })
    }
}

/// A class the player is willing to play, with their preference rank
/// (1 is the favourite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPreference {
    /// Class id.
    #[serde(rename = "class")]
    pub class_id: String,
    /// Preference rank, lower is preferred.
    pub rank: u32,
}

/// A player as submitted through the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Commitment level.
    pub involvement: Involvement,
    /// Timezone and weekly availability.
    pub availability: Availability,
    /// Classes the player would play.
    #[serde(default)]
    pub classes: Vec<ClassPreference>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Player {
    /// Class ids in preference order. Equal ranks keep submission order.
    #[must_use]
    pub fn ranked_classes(&self) -> Vec<&str> {
        let mut classes: Vec<&ClassPreference> = self.classes.iter().collect();
        classes.sort_by_key(|preference| preference.rank);
        classes
            .into_iter()
            .map(|preference| preference.class_id.as_str())
            .collect()
    }

    /// The player's top-ranked class.
    #[must_use]
    pub fn default_class(&self) -> Option<&str> {
        self.ranked_classes().first().copied()
    }
}

impl Participant for Player {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn schedule(&self) -> &Schedule {
        &self.availability.schedule
    }
}

/// A player's seat in the raid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The rostered player's id.
    pub player_id: String,
    /// Display name, copied from the player.
    pub name: String,
    /// Class being played.
    #[serde(rename = "class")]
    pub class_id: String,
    /// Spec being played, once chosen.
    #[serde(rename = "spec", default, skip_serializing_if = "Option::is_none")]
    pub spec_id: Option<String>,
    /// Role label. Unrecognised labels count as damage.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    Role::Damage.to_string()
}

impl RosterEntry {
    /// Creates an entry with no spec, playing damage.
    pub fn new(
        player_id: impl Into<String>,
        name: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            class_id: class_id.into(),
            spec_id: None,
            role: default_role(),
        }
    }

    /// Seats a player on their top-ranked class.
    ///
    /// Returns `None` if the player listed no classes.
    #[must_use]
    pub fn for_player(player: &Player) -> Option<Self> {
        player
            .default_class()
            .map(|class| Self::new(&player.id, &player.name, class))
    }

    /// Sets the spec, returning the entry.
    #[must_use]
    pub fn with_spec(mut self, spec_id: &str) -> Self {
        if let Some(spec) = classes::spec(&self.class_id, spec_id) {
            self.role = spec.role.to_string();
        }
        self.spec_id = Some(spec_id.to_string());
        self
    }

    /// The classified role.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::classify(&self.role)
    }

    /// Icon of the chosen spec, falling back to the class icon.
    #[must_use]
    pub fn icon(&self) -> Option<&'static str> {
        let class = classes::class(&self.class_id)?;
        Some(
            self.spec_id
                .as_deref()
                .and_then(|spec| class.spec(spec))
                .map_or(class.icon, |spec| spec.icon),
        )
    }

    /// Sort key for roster display: exact `Tank`, `Healer` and `Damage`
    /// labels first, anything else last.
    fn display_rank(&self) -> u8 {
        match self.role.as_str() {
            "Tank" => 0,
            "Healer" => 1,
            "Damage" => 2,
            _ => 3,
        }
    }
}

/// Error raised when a roster change cannot be applied.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RosterError {
    /// The player already has a seat.
    #[error("player '{0}' is already on the roster")]
    AlreadyRostered(String),

    /// The player has no seat.
    #[error("player '{0}' is not on the roster")]
    NotRostered(String),

    /// The spec does not belong to the entry's class.
    #[error("'{spec}' is not a spec of '{class}'")]
    UnknownSpec {
        /// The entry's class.
        class: String,
        /// The rejected spec.
        spec: String,
    },
}

/// A change to the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    /// Seats a player.
    Add(RosterEntry),
    /// Removes a player by id.
    Remove(String),
    /// Switches a player's class and clears their spec.
    SetClass {
        /// Player id.
        player_id: String,
        /// New class id.
        class_id: String,
    },
    /// Chooses a spec and takes on its role.
    SetSpec {
        /// Player id.
        player_id: String,
        /// Spec id, which must belong to the player's class.
        spec_id: String,
    },
    /// Overrides a player's role label.
    SetRole {
        /// Player id.
        player_id: String,
        /// New role label.
        role: String,
    },
    /// Empties the roster.
    Clear,
}

/// The raid roster: an ordered set of entries, unique by player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// An empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Applies a change, returning the new roster.
    ///
    /// # Errors
    ///
    /// Returns an error if a player is added twice, if the target of an
    /// update is not rostered, or if a spec does not match the class.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn apply(&self, change: RosterChange) -> Result<Self, RosterError> {
        let mut next = self.clone();
        match change {
            RosterChange::Add(entry) => {
                if next.contains(&entry.player_id) {
                    return Err(RosterError::AlreadyRostered(entry.player_id));
                }
                next.entries.push(entry);
            }
            RosterChange::Remove(player_id) => {
                let before = next.entries.len();
                next.entries.retain(|entry| entry.player_id != player_id);
                if next.entries.len() == before {
                    return Err(RosterError::NotRostered(player_id));
                }
            }
            RosterChange::SetClass {
                player_id,
                class_id,
            } => {
                let entry = next.entry_mut(&player_id)?;
                entry.class_id = class_id;
                entry.spec_id = None;
            }
            RosterChange::SetSpec { player_id, spec_id } => {
                let entry = next.entry_mut(&player_id)?;
                let spec = classes::spec(&entry.class_id, &spec_id).ok_or_else(|| {
                    RosterError::UnknownSpec {
                        class: entry.class_id.clone(),
                        spec: spec_id.clone(),
                    }
                })?;
                entry.role = spec.role.to_string();
                entry.spec_id = Some(spec_id);
            }
            RosterChange::SetRole { player_id, role } => {
                next.entry_mut(&player_id)?.role = role;
            }
            RosterChange::Clear => next.entries.clear(),
        }
        Ok(next)
    }

    fn entry_mut(&mut self, player_id: &str) -> Result<&mut RosterEntry, RosterError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.player_id == player_id)
            .ok_or_else(|| RosterError::NotRostered(player_id.to_string()))
    }

    /// Whether a player has a seat.
    #[must_use]
    pub fn contains(&self, player_id: &str) -> bool {
        self.get(player_id).is_some()
    }

    /// The entry for a player.
    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|entry| entry.player_id == player_id)
    }

    /// Entries in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Entries grouped tanks, healers, damage, then other labels. Order within
    /// a group is the order of addition.
    #[must_use]
    pub fn display_order(&self) -> Vec<&RosterEntry> {
        let mut entries: Vec<&RosterEntry> = self.entries.iter().collect();
        entries.sort_by_key(|entry| entry.display_rank());
        entries
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RosterEntry> for Roster {
    /// Collects entries, keeping the first entry for each player.
    fn from_iter<T: IntoIterator<Item = RosterEntry>>(iter: T) -> Self {
        let mut roster = Self::new();
        for entry in iter {
            if !roster.contains(&entry.player_id) {
                roster.entries.push(entry);
            }
        }
        roster
    }
}

/// Every player who submitted availability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    /// Creates a pool from loaded players, keeping load order.
    #[must_use]
    pub const fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// All players.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by id.
    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }

    /// Players not on the roster, ordered by involvement. Order within an
    /// involvement level is load order.
    #[must_use]
    pub fn bench(&self, roster: &Roster) -> Vec<&Player> {
        let mut bench: Vec<&Player> = self
            .players
            .iter()
            .filter(|player| !roster.contains(&player.id))
            .collect();
        bench.sort_by(|a, b| a.involvement.cmp(&b.involvement));
        bench
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Heatmap,
        slot::{DaySlot, Weekday},
    };

    fn player(id: &str, involvement: &str, classes: &[(&str, u32)]) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_uppercase(),
            involvement: Involvement::from(involvement.to_string()),
            availability: Availability {
                timezone: "UTC".to_string(),
                schedule: Schedule::new(),
            },
            classes: classes
                .iter()
                .map(|(class, rank)| ClassPreference {
                    class_id: (*class).to_string(),
                    rank: *rank,
                })
                .collect(),
            comments: None,
        }
    }

    #[test]
    fn default_class_is_top_ranked() {
        let player = player("a", "Core", &[("mage", 2), ("priest", 1), ("rogue", 3)]);
        assert_eq!(player.ranked_classes(), vec!["priest", "mage", "rogue"]);
        assert_eq!(player.default_class(), Some("priest"));

        let entry = RosterEntry::for_player(&player).unwrap();
        assert_eq!(entry.class_id, "priest");
        assert_eq!(entry.role(), Role::Damage);
    }

    #[test]
    fn namesakes_aggregate_as_separate_players() {
        let mut first = player("sam-1", "Core", &[]);
        let mut second = player("sam-2", "Fill", &[]);
        first.name = "Sam".to_string();
        second.name = "Sam".to_string();
        let cell = DaySlot::new(Weekday::Wednesday, "02:30".parse().unwrap());
        first.availability.schedule.insert(cell);
        second.availability.schedule.insert(cell);

        let mut heatmap = Heatmap::aggregate(&[first]);
        assert!(heatmap.add(&second));
        assert_eq!(heatmap.count(cell), 2);
        assert!(heatmap.remove("sam-1"));
        assert_eq!(heatmap.names(cell), vec!["Sam"]);
        assert!(heatmap.contains("sam-2"));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let roster = Roster::new()
            .apply(RosterChange::Add(RosterEntry::new("a", "A", "mage")))
            .unwrap();

        let error = roster
            .apply(RosterChange::Add(RosterEntry::new("a", "A", "priest")))
            .unwrap_err();
        assert_eq!(error, RosterError::AlreadyRostered("a".to_string()));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn setting_spec_derives_role() {
        let roster = Roster::new()
            .apply(RosterChange::Add(RosterEntry::new("a", "A", "priest")))
            .unwrap()
            .apply(RosterChange::SetSpec {
                player_id: "a".to_string(),
                spec_id: "holy".to_string(),
            })
            .unwrap();

        let entry = roster.get("a").unwrap();
        assert_eq!(entry.spec_id.as_deref(), Some("holy"));
        assert_eq!(entry.role(), Role::Healer);
        assert_eq!(entry.icon(), Some("spell_holy_guardianspirit"));
    }

    #[test]
    fn foreign_spec_is_rejected() {
        let roster = Roster::new()
            .apply(RosterChange::Add(RosterEntry::new("a", "A", "mage")))
            .unwrap();
        let error = roster
            .apply(RosterChange::SetSpec {
                player_id: "a".to_string(),
                spec_id: "holy".to_string(),
            })
            .unwrap_err();
        assert!(matches!(error, RosterError::UnknownSpec { .. }));
    }

    #[test]
    fn changing_class_clears_spec() {
        let roster: Roster = [RosterEntry::new("a", "A", "priest").with_spec("holy")]
            .into_iter()
            .collect();
        let roster = roster
            .apply(RosterChange::SetClass {
                player_id: "a".to_string(),
                class_id: "mage".to_string(),
            })
            .unwrap();

        let entry = roster.get("a").unwrap();
        assert_eq!(entry.class_id, "mage");
        assert_eq!(entry.spec_id, None);
        assert_eq!(entry.icon(), Some("classicon_mage"));
    }

    #[test]
    fn updates_to_missing_players_fail() {
        let roster = Roster::new();
        assert_eq!(
            roster.apply(RosterChange::Remove("x".to_string())),
            Err(RosterError::NotRostered("x".to_string()))
        );
        assert!(roster
            .apply(RosterChange::SetRole {
                player_id: "x".to_string(),
                role: "Tank".to_string(),
            })
            .is_err());
    }

    #[test]
    fn applying_leaves_the_original_untouched() {
        let roster: Roster = [RosterEntry::new("a", "A", "mage")].into_iter().collect();
        let cleared = roster.apply(RosterChange::Clear).unwrap();

        assert!(cleared.is_empty());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn display_order_groups_by_role() {
        let roster: Roster = [
            RosterEntry::new("d1", "D1", "mage"),
            RosterEntry::new("h", "H", "priest").with_spec("holy"),
            RosterEntry {
                role: "Bench".to_string(),
                ..RosterEntry::new("x", "X", "rogue")
            },
            RosterEntry::new("t", "T", "warrior").with_spec("protection"),
            RosterEntry::new("d2", "D2", "hunter"),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = roster
            .display_order()
            .into_iter()
            .map(|entry| entry.player_id.as_str())
            .collect();
        assert_eq!(order, vec!["t", "h", "d1", "d2", "x"]);
    }

    #[test]
    fn bench_is_pool_minus_roster_by_involvement() {
        let pool = PlayerPool::new(vec![
            player("heroic", "heroic", &[]),
            player("fill", "Fill", &[]),
            player("casual", "Sometimes", &[]),
            player("core1", "Core", &[]),
            player("core2", "core", &[]),
        ]);
        let roster: Roster = [RosterEntry::new("core1", "CORE1", "mage")]
            .into_iter()
            .collect();

        let bench: Vec<_> = pool
            .bench(&roster)
            .into_iter()
            .map(|player| player.id.as_str())
            .collect();
        assert_eq!(bench, vec!["core2", "fill", "heroic", "casual"]);
    }

    #[test]
    fn involvement_round_trips_as_text() {
        let parsed: Involvement = serde_json::from_str("\"Heroic Only\"").unwrap();
        assert_eq!(parsed, Involvement::HeroicOnly);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Heroic Only\"");
    }
}
