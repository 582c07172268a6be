//! Raid composition analysis.
//!
//! A [`CompositionReport`] is a pure function of the roster, the capability
//! table and the team configuration. It is rebuilt from scratch whenever the
//! roster changes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{
    capability::{
        ArmorType, CapabilityTable, RaidBuff, RaidUtility, TierToken, armor_type, tier_token,
    },
    classes::{self, Role},
    config::Config,
    roster::RosterEntry,
};

/// A utility whose value is measured in distinct classes providing it, up to
/// a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackingRule {
    /// The capped utility.
    pub utility: RaidUtility,
    /// Sources beyond this count add nothing.
    pub cap: usize,
}

impl StackingRule {
    /// The rules of the current game version.
    pub const STANDARD: &'static [Self] = &[Self {
        utility: RaidUtility::MeleeSlowStack,
        cap: 3,
    }];
}

/// Count of a role against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    /// The role.
    pub role: Role,
    /// Rostered players in the role.
    pub count: usize,
    /// Desired number.
    pub target: usize,
    /// Whether `count` exceeds `target`.
    pub over_target: bool,
}

/// Number of rostered players on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    /// Class id.
    pub class: String,
    /// Rostered players.
    pub count: usize,
}

/// A player credited with a utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// Player name.
    pub name: String,
    /// Spec icon, or class icon when no spec is chosen.
    pub icon: Option<&'static str>,
}

/// How many times a utility is provided, and by whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UtilityTally {
    /// Providing roster entries.
    pub count: usize,
    /// Providing players, one per player, sorted by name.
    pub contributors: Vec<Contributor>,
}

/// A capped utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackingMetric {
    /// The utility.
    pub utility: RaidUtility,
    /// Distinct classes providing it.
    pub sources: usize,
    /// The ceiling.
    pub cap: usize,
    /// `min(sources, cap)`.
    pub value: usize,
}

/// Everything derived from a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    /// Tank, healer and damage counts.
    pub roles: Vec<RoleCount>,
    /// Every catalog class in catalog order, then unknown classes by id.
    pub classes: Vec<ClassCount>,
    /// Players per armor type, all four types present.
    pub armor: BTreeMap<ArmorType, usize>,
    /// Players per tier token, all four tokens present.
    pub tier_tokens: BTreeMap<TierToken, usize>,
    /// Buffs provided by at least one player.
    pub buffs: BTreeSet<RaidBuff>,
    /// Buffs nobody provides.
    pub missing_buffs: Vec<RaidBuff>,
    /// Provided utilities.
    pub utilities: BTreeMap<RaidUtility, UtilityTally>,
    /// Capped utilities.
    pub stacking: Vec<StackingMetric>,
    /// Counts of the configured key utilities, zero when absent.
    pub key_utilities: Vec<(RaidUtility, usize)>,
    /// Rostered players.
    pub total: usize,
    /// Seats in the raid.
    pub raid_size: usize,
}

impl CompositionReport {
    /// The count for a role.
    #[must_use]
    pub fn role_count(&self, role: Role) -> usize {
        self.roles
            .iter()
            .find(|count| count.role == role)
            .map_or(0, |count| count.count)
    }

    /// How many entries provide a utility.
    #[must_use]
    pub fn utility_count(&self, utility: RaidUtility) -> usize {
        self.utilities.get(&utility).map_or(0, |tally| tally.count)
    }

    /// The number of players on a class.
    #[must_use]
    pub fn class_count(&self, class_id: &str) -> usize {
        self.classes
            .iter()
            .find(|count| count.class == class_id)
            .map_or(0, |count| count.count)
    }
}

/// Builds composition reports.
#[derive(Debug, Clone, Copy)]
pub struct CompositionAnalyzer<'a> {
    table: &'a CapabilityTable,
    config: &'a Config,
    stacking: &'a [StackingRule],
}

impl<'a> CompositionAnalyzer<'a> {
    /// An analyzer using the standard stacking rules.
    #[must_use]
    pub const fn new(table: &'a CapabilityTable, config: &'a Config) -> Self {
        Self {
            table,
            config,
            stacking: StackingRule::STANDARD,
        }
    }

    /// Replaces the stacking rules.
    #[must_use]
    pub const fn with_stacking(mut self, stacking: &'a [StackingRule]) -> Self {
        self.stacking = stacking;
        self
    }

    /// Analyzes a roster.
    #[tracing::instrument(level = "debug", skip_all, fields(entries = roster.len()))]
    pub fn analyze(&self, roster: &[RosterEntry]) -> CompositionReport {
        let mut role_counts: BTreeMap<Role, usize> = BTreeMap::new();
        let mut class_counts: BTreeMap<(usize, &str), usize> = classes::CLASSES
            .iter()
            .enumerate()
            .map(|(position, class)| ((position, class.id), 0))
            .collect();
        let mut armor: BTreeMap<ArmorType, usize> =
            ArmorType::ALL.iter().map(|&armor| (armor, 0)).collect();
        let mut tier_tokens: BTreeMap<TierToken, usize> =
            TierToken::ALL.iter().map(|&token| (token, 0)).collect();
        let mut buffs = BTreeSet::new();
        let mut utilities: BTreeMap<RaidUtility, UtilityTally> = BTreeMap::new();
        let mut credited: BTreeMap<RaidUtility, BTreeSet<&str>> = BTreeMap::new();
        let mut providing_classes: BTreeMap<RaidUtility, BTreeSet<&str>> = BTreeMap::new();

        for entry in roster {
            *role_counts.entry(entry.role()).or_default() += 1;

            let class = entry.class_id.as_str();
            *class_counts
                .entry((classes::catalog_position(class), class))
                .or_default() += 1;

            match armor_type(class) {
                Some(kind) => *armor.entry(kind).or_default() += 1,
                None => tracing::debug!(class, "no armor type, skipping"),
            }
            if let Some(token) = tier_token(class) {
                *tier_tokens.entry(token).or_default() += 1;
            }

            let capabilities = self.table.resolve(class, entry.spec_id.as_deref());
            buffs.extend(capabilities.buffs.iter().copied());
            for &utility in &capabilities.utilities {
                let tally = utilities.entry(utility).or_default();
                tally.count += 1;
                if credited
                    .entry(utility)
                    .or_default()
                    .insert(entry.player_id.as_str())
                {
                    tally.contributors.push(Contributor {
                        name: entry.name.clone(),
                        icon: entry.icon(),
                    });
                }
                providing_classes.entry(utility).or_default().insert(class);
            }
        }

        for tally in utilities.values_mut() {
            tally.contributors.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let targets = &self.config.role_targets;
        let roles = Role::ALL
            .iter()
            .map(|&role| {
                let count = role_counts.get(&role).copied().unwrap_or_default();
                let target = targets.target(role);
                RoleCount {
                    role,
                    count,
                    target,
                    over_target: count > target,
                }
            })
            .collect();

        let stacking = self
            .stacking
            .iter()
            .map(|rule| {
                let sources = providing_classes.get(&rule.utility).map_or(0, BTreeSet::len);
                StackingMetric {
                    utility: rule.utility,
                    sources,
                    cap: rule.cap,
                    value: sources.min(rule.cap),
                }
            })
            .collect();

        let key_utilities = self
            .config
            .key_utilities
            .iter()
            .map(|&utility| {
                let count = utilities.get(&utility).map_or(0, |tally| tally.count);
                (utility, count)
            })
            .collect();

        let missing_buffs = RaidBuff::ALL
            .iter()
            .copied()
            .filter(|buff| !buffs.contains(buff))
            .collect();

        CompositionReport {
            roles,
            classes: class_counts
                .into_iter()
                .map(|((_, class), count)| ClassCount {
                    class: class.to_string(),
                    count,
                })
                .collect(),
            armor,
            tier_tokens,
            buffs,
            missing_buffs,
            utilities,
            stacking,
            key_utilities,
            total: roster.len(),
            raid_size: self.config.raid_size,
        }
    }
}
