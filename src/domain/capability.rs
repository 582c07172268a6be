//! Static reference data: what each class and spec brings to a raid.
//!
//! Capabilities are keyed two ways: by class id (granted to every spec of the
//! class) and by `class-spec` (granted to that spec only). Resolution merges
//! both levels; a spec entry never replaces the class entry.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Human readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// A raid-wide buff. A buff is either covered or it isn't.
    pub enum RaidBuff {
        /// Warrior.
        AttackPower => "Attack Power",
        /// Mage.
        Intellect => "Intellect",
        /// Priest.
        Stamina => "Stamina",
        /// Druid.
        Versatility => "Versatility",
        /// Paladin devotion aura.
        DamageReduction => "3% DR (Devo)",
        /// Demon hunter.
        MagicDamage => "5% Magic Dmg",
        /// Monk.
        PhysicalDamage => "5% Phys Dmg",
        /// Evoker.
        MovementCdr => "Movement CDR",
        /// Hunter.
        HuntersMark => "Hunter's Mark",
        /// Rogue.
        AtrophicPoison => "Atrophic Poison",
        /// Shaman.
        Skyfury => "Skyfury/Windfury",
    }
}

labelled_enum! {
    /// A utility spell or cooldown. Utilities are counted per provider.
    pub enum RaidUtility {
        /// Haste cooldown.
        Bloodlust => "Bloodlust/Heroism",
        /// In-combat resurrection.
        CombatRes => "Combat Res",
        /// Healing reduction debuff.
        MortalWounds => "Mortal Wounds",
        /// Enrage removal.
        Soothe => "Enrage Dispel",
        /// Stacking melee attack speed slow.
        MeleeSlowStack => "Melee Slow (Stacking)",
        /// Demonic gateway and healthstones.
        WarlockKit => "Gateway/Healthstone",
        /// Raid movement speed.
        Roar => "Stampeding Roar",
        /// Raid movement speed totem.
        WindRush => "Wind Rush Totem",
        /// Free movement ability use.
        TimeSpiral => "Time Spiral",
        /// Area dispel.
        MassDispel => "Mass Dispel",
        /// Group invisibility.
        MassInvis => "Mass Invisibility/Shroud",
        /// External haste.
        PowerInfusion => "Power Infusion",
        /// Mana cooldown.
        Innervate => "Innervate",
        /// Mana cooldown.
        SymbolOfHope => "Symbol of Hope",
        /// Mana cooldown.
        ManaTide => "Mana Tide Totem",
        /// Mana support.
        SourceOfMagic => "Source of Magic",
        /// Support damage spec.
        Augmentation => "Augmentation Prescence",
        /// Raid magic damage reduction.
        Amz => "Anti-Magic Zone",
        /// Raid damage reduction.
        Darkness => "Darkness",
        /// Raid health increase.
        RallyingCry => "Rallying Cry",
        /// Raid healing cooldown.
        AuraMastery => "Aura Mastery",
        /// Raid healing cooldown.
        SpiritLink => "Spirit Link Totem",
        /// Raid healing cooldown.
        Revival => "Revival",
        /// Raid damage reduction.
        Barrier => "Pain Barrier",
        /// Raid healing cooldown.
        Hymn => "Divine Hymn",
        /// Raid healing cooldown.
        Rewind => "Rewind",
        /// Raid damage reduction.
        Zephyr => "Zephyr",
        /// External defensive.
        Ironbark => "Ironbark",
        /// External defensive.
        PainSupp => "Pain Suppression",
        /// External defensive.
        GuardianSpirit => "Guardian Spirit",
        /// External defensive.
        Sacrifice => "Blessing of Sacrifice",
        /// External defensive.
        TimeDilation => "Time Dilation",
        /// External defensive.
        LifeCocoon => "Life Cocoon",
        /// Movement external.
        TigersLust => "Tiger's Lust",
        /// Movement external.
        BlessingOfFreedom => "Blessing of Freedom",
        /// Movement external.
        LeapOfFaith => "Leap of Faith",
        /// Movement external.
        Rescue => "Rescue",
        /// Movement external.
        SpatialParadox => "Spatial Paradox",
        /// Immunity.
        DivineShield => "Divine Shield",
        /// Immunity.
        IceBlock => "Ice Block",
        /// Immunity.
        Turtle => "Aspect of the Turtle",
        /// Immunity.
        Cloak => "Cloak of Shadows",
        /// External immunity.
        BlessingOfProtection => "Blessing of Protection",
        /// External immunity.
        BlessingOfSpellwarding => "Blessing of Spellwarding",
        /// Dispel.
        MagicDispel => "Magic Dispel",
        /// Dispel.
        PoisonDispel => "Poison Dispel",
        /// Dispel.
        CurseDispel => "Curse Dispel",
        /// Dispel.
        DiseaseDispel => "Disease Dispel",
        /// Crowd control.
        AoeStun => "AOE Stun",
        /// Crowd control.
        SingleTargetStun => "Single Target Stun",
        /// Crowd control.
        Knock => "Knockbacks",
        /// Crowd control.
        Grip => "Grips",
        /// Crowd control.
        AoeGrip => "AOE Grips / Pulls",
        /// Crowd control.
        Sucks => "Sucks",
        /// Crowd control.
        Slow => "Slows",
        /// Crowd control.
        HardCc => "Hard CC",
        /// Crowd control.
        OppressingRoar => "Oppressing Roar",
    }
}

labelled_enum! {
    /// Armor class worn by a class.
    pub enum ArmorType {
        /// Mage, priest, warlock.
        Cloth => "Cloth",
        /// Demon hunter, druid, monk, rogue.
        Leather => "Leather",
        /// Evoker, hunter, shaman.
        Mail => "Mail",
        /// Death knight, paladin, warrior.
        Plate => "Plate",
    }
}

labelled_enum! {
    /// Tier set token group.
    pub enum TierToken {
        /// Evoker, monk, rogue, warrior.
        Zenith => "Zenith (Evoker, Monk, Rogue, Warrior)",
        /// Death knight, demon hunter, warlock.
        Dreadful => "Dreadful (DK, DH, Lock)",
        /// Druid, hunter, mage.
        Mystic => "Mystic (Druid, Hunter, Mage)",
        /// Paladin, priest, shaman.
        Venerated => "Venerated (Paladin, Priest, Shaman)",
    }
}

labelled_enum! {
    /// Primary stat.
    pub enum MainStat {
        /// Casters and healers.
        Intellect => "Intellect",
        /// Leather and mail physical specs.
        Agility => "Agility",
        /// Plate physical specs.
        Strength => "Strength",
    }
}

/// Armor type worn by a class, if the class is known.
#[must_use]
pub fn armor_type(class_id: &str) -> Option<ArmorType> {
    Some(match class_id {
        "mage" | "priest" | "warlock" => ArmorType::Cloth,
        "demon_hunter" | "druid" | "monk" | "rogue" => ArmorType::Leather,
        "evoker" | "hunter" | "shaman" => ArmorType::Mail,
        "death_knight" | "paladin" | "warrior" => ArmorType::Plate,
        _ => return None,
    })
}

/// Tier token group of a class, if the class is known.
#[must_use]
pub fn tier_token(class_id: &str) -> Option<TierToken> {
    Some(match class_id {
        "death_knight" | "demon_hunter" | "warlock" => TierToken::Dreadful,
        "druid" | "hunter" | "mage" => TierToken::Mystic,
        "paladin" | "priest" | "shaman" => TierToken::Venerated,
        "evoker" | "monk" | "rogue" | "warrior" => TierToken::Zenith,
        _ => return None,
    })
}

/// Primary stat of a class or spec.
///
/// A `class-spec` entry takes precedence over the class entry. Classes whose
/// specs disagree (druid, monk, paladin, shaman) have no class entry, so the
/// spec must be known.
#[must_use]
pub fn main_stat(class_id: &str, spec_id: Option<&str>) -> Option<MainStat> {
    let by_spec = spec_id.and_then(|spec| match (class_id, spec) {
        ("demon_hunter", "devourer")
        | ("druid", "balance" | "restoration")
        | ("monk", "mistweaver")
        | ("paladin", "holy")
        | ("shaman", "elemental" | "restoration") => Some(MainStat::Intellect),
        ("druid", "feral" | "guardian")
        | ("monk", "brewmaster" | "windwalker")
        | ("shaman", "enhancement") => Some(MainStat::Agility),
        ("paladin", "protection" | "retribution") => Some(MainStat::Strength),
        _ => None,
    });

    by_spec.or(match class_id {
        "death_knight" | "warrior" => Some(MainStat::Strength),
        "demon_hunter" | "hunter" | "rogue" => Some(MainStat::Agility),
        "evoker" | "mage" | "priest" | "warlock" => Some(MainStat::Intellect),
        _ => None,
    })
}

/// The buffs and utilities granted by one table entry, or by a resolved
/// class/spec pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Raid-wide buffs.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub buffs: BTreeSet<RaidBuff>,
    /// Utilities and cooldowns.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub utilities: BTreeSet<RaidUtility>,
}

impl Capabilities {
    /// Creates an entry from lists of buffs and utilities.
    #[must_use]
    pub fn new(buffs: &[RaidBuff], utilities: &[RaidUtility]) -> Self {
        Self {
            buffs: buffs.iter().copied().collect(),
            utilities: utilities.iter().copied().collect(),
        }
    }

    /// Adds everything in `other` to `self`.
    pub fn merge(&mut self, other: &Self) {
        self.buffs.extend(other.buffs.iter().copied());
        self.utilities.extend(other.utilities.iter().copied());
    }

    /// Whether `self` grants everything `other` grants.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.buffs.is_superset(&other.buffs) && self.utilities.is_superset(&other.utilities)
    }

    /// Whether nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty() && self.utilities.is_empty()
    }
}

/// Key of a capability table entry.
///
/// Serialised as `class` or `class-spec`. Class and spec ids use underscores,
/// never hyphens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityKey {
    /// Applies to every spec of the class.
    Class(String),
    /// Applies to one spec only.
    Spec {
        /// Class id.
        class: String,
        /// Spec id.
        spec: String,
    },
}

impl CapabilityKey {
    /// A class-level key.
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// A spec-level key.
    #[must_use]
    pub fn spec(class: impl Into<String>, spec: impl Into<String>) -> Self {
        Self::Spec {
            class: class.into(),
            spec: spec.into(),
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Class(class) => f.write_str(class),
            Self::Spec { class, spec } => write!(f, "{class}-{spec}"),
        }
    }
}

/// Error returned when a capability key is empty or has an empty segment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid capability key '{0}': expected 'class' or 'class-spec'")]
pub struct InvalidKeyError(String);

impl FromStr for CapabilityKey {
    type Err = InvalidKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidKeyError(s.to_string());
        match s.split_once('-') {
            None if !s.is_empty() => Ok(Self::class(s)),
            Some((class, spec)) if !class.is_empty() && !spec.is_empty() && !spec.contains('-') => {
                Ok(Self::spec(class, spec))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for CapabilityKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CapabilityKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The capability reference table.
///
/// Read-only once built; share it freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityTable {
    entries: BTreeMap<CapabilityKey, Capabilities>,
}

static STANDARD: LazyLock<CapabilityTable> = LazyLock::new(CapabilityTable::build_standard);

impl CapabilityTable {
    /// The built-in table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: CapabilityKey, capabilities: Capabilities) {
        self.entries.insert(key, capabilities);
    }

    /// The class-level entry, if any.
    #[must_use]
    pub fn class_entry(&self, class_id: &str) -> Option<&Capabilities> {
        self.entries.get(&CapabilityKey::class(class_id))
    }

    /// The spec-level entry, if any.
    #[must_use]
    pub fn spec_entry(&self, class_id: &str, spec_id: &str) -> Option<&Capabilities> {
        self.entries.get(&CapabilityKey::spec(class_id, spec_id))
    }

    /// Resolves the effective capabilities of a class and optional spec.
    ///
    /// The result is the class entry (empty if absent) merged with the spec
    /// entry when one exists. Unknown ids resolve to empty sets.
    #[must_use]
    pub fn resolve(&self, class_id: &str, spec_id: Option<&str>) -> Capabilities {
        let mut capabilities = self.class_entry(class_id).cloned().unwrap_or_default();
        if let Some(spec) = spec_id.and_then(|spec| self.spec_entry(class_id, spec)) {
            capabilities.merge(spec);
        }
        capabilities
    }

    /// Every entry, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&CapabilityKey, &Capabilities)> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(clippy::too_many_lines)]
    fn build_standard() -> Self {
        use RaidBuff as B;
        use RaidUtility as U;

        let rows: &[(&str, &[RaidBuff], &[RaidUtility])] = &[
            (
                "death_knight",
                &[],
                &[U::CombatRes, U::Amz, U::MeleeSlowStack, U::MagicDispel, U::Grip, U::SingleTargetStun, U::Slow],
            ),
            ("death_knight-blood", &[], &[U::AoeGrip]),
            (
                "demon_hunter",
                &[B::MagicDamage],
                &[U::Darkness, U::AoeStun, U::HardCc, U::Slow, U::Grip],
            ),
            ("demon_hunter-havoc", &[], &[U::MortalWounds]),
            ("demon_hunter-vengeance", &[], &[U::AoeGrip]),
            (
                "druid",
                &[B::Versatility],
                &[
                    U::CombatRes, U::Roar, U::Soothe, U::PoisonDispel, U::CurseDispel, U::Knock,
                    U::Slow, U::HardCc, U::Sucks, U::SingleTargetStun,
                ],
            ),
            ("druid-restoration", &[], &[U::Innervate, U::Ironbark, U::MagicDispel]),
            (
                "evoker",
                &[B::MovementCdr],
                &[
                    U::Bloodlust, U::Zephyr, U::TimeSpiral, U::Rescue, U::SpatialParadox,
                    U::SourceOfMagic, U::PoisonDispel, U::CurseDispel, U::MagicDispel, U::Knock,
                    U::Slow, U::HardCc, U::OppressingRoar,
                ],
            ),
            ("evoker-preservation", &[], &[U::Soothe, U::Rewind, U::TimeDilation]),
            ("evoker-augmentation", &[], &[U::Soothe, U::Augmentation]),
            (
                "hunter",
                &[B::HuntersMark],
                &[
                    U::Bloodlust, U::Soothe, U::MortalWounds, U::Turtle, U::Knock, U::HardCc,
                    U::Slow, U::SingleTargetStun,
                ],
            ),
            (
                "mage",
                &[B::Intellect],
                &[U::Bloodlust, U::MassInvis, U::CurseDispel, U::IceBlock, U::Slow, U::HardCc, U::Knock],
            ),
            (
                "monk",
                &[B::PhysicalDamage],
                &[
                    U::PoisonDispel, U::DiseaseDispel, U::Soothe, U::TigersLust, U::AoeStun,
                    U::Knock, U::HardCc,
                ],
            ),
            ("monk-mistweaver", &[], &[U::Revival, U::LifeCocoon, U::MagicDispel]),
            ("monk-windwalker", &[], &[U::SingleTargetStun]),
            (
                "paladin",
                &[B::DamageReduction],
                &[
                    U::CombatRes, U::Sacrifice, U::BlessingOfFreedom, U::PoisonDispel,
                    U::DiseaseDispel, U::DivineShield, U::BlessingOfProtection, U::HardCc, U::Slow,
                    U::SingleTargetStun,
                ],
            ),
            ("paladin-holy", &[], &[U::AuraMastery, U::MagicDispel]),
            ("paladin-protection", &[], &[U::BlessingOfSpellwarding]),
            (
                "priest",
                &[B::Stamina],
                &[U::MassDispel, U::PowerInfusion, U::LeapOfFaith, U::DiseaseDispel, U::HardCc, U::Slow],
            ),
            ("priest-discipline", &[], &[U::Barrier, U::PainSupp, U::MagicDispel]),
            (
                "priest-holy",
                &[],
                &[U::Hymn, U::GuardianSpirit, U::SymbolOfHope, U::MagicDispel, U::SingleTargetStun],
            ),
            (
                "rogue",
                &[B::AtrophicPoison],
                &[
                    U::MassInvis, U::MeleeSlowStack, U::MortalWounds, U::Soothe, U::Cloak, U::HardCc,
                    U::Slow, U::SingleTargetStun,
                ],
            ),
            (
                "shaman",
                &[B::Skyfury],
                &[U::Bloodlust, U::WindRush, U::CurseDispel, U::AoeStun, U::Knock, U::Slow, U::HardCc],
            ),
            ("shaman-restoration", &[], &[U::SpiritLink, U::ManaTide, U::MagicDispel]),
            (
                "warlock",
                &[],
                &[
                    U::CombatRes, U::WarlockKit, U::MeleeSlowStack, U::MagicDispel, U::AoeStun,
                    U::HardCc, U::Slow,
                ],
            ),
            ("warlock-demonology", &[], &[U::SingleTargetStun]),
            (
                "warrior",
                &[B::AttackPower],
                &[U::RallyingCry, U::AoeStun, U::Slow, U::SingleTargetStun],
            ),
            ("warrior-arms", &[], &[U::MortalWounds, U::Sucks]),
            ("warrior-fury", &[], &[U::Sucks]),
        ];

        let mut table = Self::default();
        for (key, buffs, utilities) in rows {
            match key.parse() {
                Ok(key) => table.insert(key, Capabilities::new(buffs, utilities)),
                Err(error) => tracing::warn!("skipping built-in capability row: {error}"),
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_resolution_is_a_union() {
        let table = CapabilityTable::standard();

        let class_only = table.resolve("priest", None);
        let holy = table.resolve("priest", Some("holy"));

        assert!(holy.is_superset(&class_only));
        assert!(holy.buffs.contains(&RaidBuff::Stamina));
        assert!(holy.utilities.contains(&RaidUtility::MassDispel));
        assert!(holy.utilities.contains(&RaidUtility::GuardianSpirit));
        assert!(!class_only.utilities.contains(&RaidUtility::GuardianSpirit));
    }

    #[test]
    fn every_standard_spec_is_a_superset_of_its_class() {
        let table = CapabilityTable::standard();
        for class in crate::domain::classes::CLASSES {
            let base = table.resolve(class.id, None);
            for spec in class.specs {
                assert!(
                    table.resolve(class.id, Some(spec.id)).is_superset(&base),
                    "{}-{}",
                    class.id,
                    spec.id
                );
            }
        }
    }

    #[test]
    fn spec_without_entry_returns_class_entry() {
        let table = CapabilityTable::standard();
        assert_eq!(
            table.resolve("mage", Some("fire")),
            table.resolve("mage", None)
        );
    }

    #[test]
    fn unknown_class_resolves_to_nothing() {
        let table = CapabilityTable::standard();
        assert!(table.resolve("bard", Some("lute")).is_empty());
    }

    #[test]
    fn spec_entry_without_class_entry_still_applies() {
        let mut table = CapabilityTable::default();
        table.insert(
            CapabilityKey::spec("tinker", "gadgets"),
            Capabilities::new(&[], &[RaidUtility::CombatRes]),
        );

        let resolved = table.resolve("tinker", Some("gadgets"));
        assert_eq!(resolved.utilities.len(), 1);
        assert!(table.resolve("tinker", None).is_empty());
    }

    #[test]
    fn standard_table_is_complete() {
        // A malformed built-in row is skipped, so the count catches typos.
        assert_eq!(CapabilityTable::standard().len(), 29);
    }

    #[test]
    fn standard_keys_name_catalog_classes_and_specs() {
        for (key, _) in CapabilityTable::standard().entries() {
            let known = match key {
                CapabilityKey::Class(class) => crate::domain::classes::class(class).is_some(),
                CapabilityKey::Spec { class, spec } => {
                    crate::domain::classes::spec(class, spec).is_some()
                }
            };
            assert!(known, "{key}");
        }
    }

    #[test]
    fn parses_keys() {
        assert_eq!("warrior".parse(), Ok(CapabilityKey::class("warrior")));
        assert_eq!(
            "warrior-fury".parse(),
            Ok(CapabilityKey::spec("warrior", "fury"))
        );
        assert!("".parse::<CapabilityKey>().is_err());
        assert!("warrior-".parse::<CapabilityKey>().is_err());
        assert!("a-b-c".parse::<CapabilityKey>().is_err());
    }

    #[test]
    fn table_round_trips_through_yaml() {
        let yaml = "warrior:\n  buffs:\n  - attack_power\nwarrior-fury:\n  utilities:\n  - sucks\n";
        let table: CapabilityTable = serde_yaml::from_str(yaml).unwrap();

        let fury = table.resolve("warrior", Some("fury"));
        assert!(fury.buffs.contains(&RaidBuff::AttackPower));
        assert!(fury.utilities.contains(&RaidUtility::Sucks));
        assert_eq!(serde_yaml::to_string(&table).unwrap(), yaml);
    }

    #[test]
    fn static_tables() {
        assert_eq!(armor_type("death_knight"), Some(ArmorType::Plate));
        assert_eq!(armor_type("priest"), Some(ArmorType::Cloth));
        assert_eq!(armor_type("bard"), None);
        assert_eq!(tier_token("rogue"), Some(TierToken::Zenith));
        assert_eq!(main_stat("druid", Some("feral")), Some(MainStat::Agility));
        assert_eq!(main_stat("druid", None), None);
        assert_eq!(
            main_stat("demon_hunter", Some("devourer")),
            Some(MainStat::Intellect)
        );
        assert_eq!(
            main_stat("demon_hunter", Some("havoc")),
            Some(MainStat::Agility)
        );
    }

    #[test]
    fn labels() {
        assert_eq!(RaidBuff::DamageReduction.to_string(), "3% DR (Devo)");
        assert_eq!(RaidUtility::WarlockKit.label(), "Gateway/Healthstone");
        assert_eq!(RaidBuff::ALL.len(), 11);
    }
}
