//! The class catalog: every playable class and its specialisations.

use std::fmt;

use serde::{Deserialize, Serialize};
use Role::{Damage, Healer, Tank};

/// The part a character plays in a raid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    /// Holds the boss's attention.
    Tank,
    /// Keeps the raid alive.
    Healer,
    /// Everything else.
    #[default]
    Damage,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 3] = [Self::Tank, Self::Healer, Self::Damage];

    /// Classifies a free-form role string. Anything unrecognised is
    /// [`Role::Damage`].
    #[must_use]
    pub fn classify(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "tank" => Self::Tank,
            "healer" | "heal" => Self::Healer,
            _ => Self::Damage,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Tank => "Tank",
            Self::Healer => "Healer",
            Self::Damage => "Damage",
        })
    }
}

/// A playable class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    /// Stable identifier, e.g. `death_knight`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Class colour as a hex string.
    pub color: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Specialisations, in display order.
    pub specs: &'static [SpecInfo],
}

/// A specialisation of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecInfo {
    /// Identifier, unique within the class, e.g. `blood`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Role the spec fills.
    pub role: Role,
    /// Whether the spec fights in melee range.
    pub melee: bool,
    /// Short display name where the plain name is ambiguous.
    pub display_name: Option<&'static str>,
}

impl SpecInfo {
    /// The short display name, falling back to the plain name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.display_name.unwrap_or(self.name)
    }
}

impl ClassInfo {
    /// Looks up a spec of this class.
    #[must_use]
    pub fn spec(&self, spec_id: &str) -> Option<&'static SpecInfo> {
        self.specs.iter().find(|spec| spec.id == spec_id)
    }
}

/// Looks up a class by id.
#[must_use]
pub fn class(class_id: &str) -> Option<&'static ClassInfo> {
    CLASSES.iter().find(|class| class.id == class_id)
}

/// Looks up a spec by class and spec id.
#[must_use]
pub fn spec(class_id: &str, spec_id: &str) -> Option<&'static SpecInfo> {
    class(class_id)?.spec(spec_id)
}

/// Position of a class in catalog order, for stable sorting. Unknown classes
/// sort last.
#[must_use]
pub fn catalog_position(class_id: &str) -> usize {
    CLASSES
        .iter()
        .position(|class| class.id == class_id)
        .unwrap_or(CLASSES.len())
}

const fn spec_info(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    role: Role,
    melee: bool,
) -> SpecInfo {
    SpecInfo {
        id,
        name,
        icon,
        role,
        melee,
        display_name: None,
    }
}

const fn named(mut info: SpecInfo, display_name: &'static str) -> SpecInfo {
    info.display_name = Some(display_name);
    info
}

/// Every class, in display order.
pub static CLASSES: &[ClassInfo] = &[
    ClassInfo {
        id: "death_knight",
        name: "Death Knight",
        color: "#C41F3B",
        icon: "classicon_deathknight",
        specs: &[
            spec_info("blood", "Blood", "spell_deathknight_bloodpresence", Tank, true),
            spec_info("frost", "Frost", "spell_deathknight_frostpresence", Damage, true),
            spec_info("unholy", "Unholy", "spell_deathknight_unholypresence", Damage, true),
        ],
    },
    ClassInfo {
        id: "demon_hunter",
        name: "Demon Hunter",
        color: "#A330C9",
        icon: "classicon_demonhunter",
        specs: &[
            spec_info("havoc", "Havoc", "ability_demonhunter_specdps", Damage, true),
            named(
                spec_info("vengeance", "Vengeance", "ability_demonhunter_spectank", Tank, true),
                "VDH",
            ),
            spec_info("devourer", "Devourer", "classicon_demonhunter_void", Damage, false),
        ],
    },
    ClassInfo {
        id: "druid",
        name: "Druid",
        color: "#FF7D0A",
        icon: "classicon_druid",
        specs: &[
            spec_info("balance", "Balance", "spell_nature_starfall", Damage, false),
            spec_info("feral", "Feral", "ability_druid_catform", Damage, true),
            spec_info("guardian", "Guardian", "ability_racial_bearform", Tank, true),
            named(
                spec_info("restoration", "Restoration", "spell_nature_healingtouch", Healer, false),
                "Resto Druid",
            ),
        ],
    },
    ClassInfo {
        id: "evoker",
        name: "Evoker",
        color: "#33937F",
        icon: "classicon_evoker",
        specs: &[
            spec_info("augmentation", "Augmentation", "classicon_evoker_augmentation", Damage, false),
            spec_info("devastation", "Devastation", "classicon_evoker_devastation", Damage, false),
            spec_info("preservation", "Preservation", "classicon_evoker_preservation", Healer, false),
        ],
    },
    ClassInfo {
        id: "hunter",
        name: "Hunter",
        color: "#ABD473",
        icon: "classicon_hunter",
        specs: &[
            spec_info("beast_mastery", "Beast Mastery", "ability_hunter_bestialdiscipline", Damage, false),
            spec_info("marksmanship", "Marksmanship", "ability_hunter_focusedaim", Damage, false),
            spec_info("survival", "Survival", "ability_hunter_camouflage", Damage, true),
        ],
    },
    ClassInfo {
        id: "mage",
        name: "Mage",
        color: "#69CCF0",
        icon: "classicon_mage",
        specs: &[
            spec_info("arcane", "Arcane", "spell_holy_magicalsentry", Damage, false),
            spec_info("fire", "Fire", "spell_fire_firebolt02", Damage, false),
            spec_info("frost", "Frost", "spell_frost_frostbolt02", Damage, false),
        ],
    },
    ClassInfo {
        id: "monk",
        name: "Monk",
        color: "#00FF96",
        icon: "classicon_monk",
        specs: &[
            spec_info("brewmaster", "Brewmaster", "spell_monk_brewmaster_spec", Tank, true),
            spec_info("mistweaver", "Mistweaver", "spell_monk_mistweaver_spec", Healer, true),
            spec_info("windwalker", "Windwalker", "spell_monk_windwalker_spec", Damage, true),
        ],
    },
    ClassInfo {
        id: "paladin",
        name: "Paladin",
        color: "#F58CBA",
        icon: "classicon_paladin",
        specs: &[
            named(
                spec_info("holy", "Holy", "spell_holy_holybolt", Healer, true),
                "Holy Paladin",
            ),
            named(
                spec_info("protection", "Protection", "ability_paladin_shieldofthetemplar", Tank, true),
                "Prot Paladin",
            ),
            spec_info("retribution", "Retribution", "spell_holy_auraoflight", Damage, true),
        ],
    },
    ClassInfo {
        id: "priest",
        name: "Priest",
        color: "#FFFFFF",
        icon: "classicon_priest",
        specs: &[
            spec_info("discipline", "Discipline", "spell_holy_powerwordshield", Healer, false),
            named(
                spec_info("holy", "Holy", "spell_holy_guardianspirit", Healer, false),
                "Holy Priest",
            ),
            spec_info("shadow", "Shadow", "spell_shadow_shadowwordpain", Damage, false),
        ],
    },
    ClassInfo {
        id: "rogue",
        name: "Rogue",
        color: "#FFF569",
        icon: "classicon_rogue",
        specs: &[
            spec_info("assassination", "Assassination", "ability_rogue_eviscerate", Damage, true),
            spec_info("outlaw", "Outlaw", "ability_rogue_waylay", Damage, true),
            spec_info("subtlety", "Subtlety", "ability_stealth", Damage, true),
        ],
    },
    ClassInfo {
        id: "shaman",
        name: "Shaman",
        color: "#0070DE",
        icon: "classicon_shaman",
        specs: &[
            spec_info("elemental", "Elemental", "spell_nature_lightning", Damage, false),
            spec_info("enhancement", "Enhancement", "spell_shaman_improvedstormstrike", Damage, true),
            named(
                spec_info("restoration", "Restoration", "spell_nature_magicimmunity", Healer, false),
                "Resto Shaman",
            ),
        ],
    },
    ClassInfo {
        id: "warlock",
        name: "Warlock",
        color: "#9482C9",
        icon: "classicon_warlock",
        specs: &[
            spec_info("affliction", "Affliction", "spell_shadow_deathcoil", Damage, false),
            spec_info("demonology", "Demonology", "spell_shadow_metamorphosis", Damage, false),
            spec_info("destruction", "Destruction", "spell_shadow_rainoffire", Damage, false),
        ],
    },
    ClassInfo {
        id: "warrior",
        name: "Warrior",
        color: "#C79C6E",
        icon: "classicon_warrior",
        specs: &[
            spec_info("arms", "Arms", "ability_warrior_savageblow", Damage, true),
            spec_info("fury", "Fury", "ability_warrior_innerrage", Damage, true),
            spec_info("protection", "Protection", "ability_warrior_defensivestance", Tank, true),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_classification_defaults_to_damage() {
        assert_eq!(Role::classify("Tank"), Role::Tank);
        assert_eq!(Role::classify(" healer "), Role::Healer);
        assert_eq!(Role::classify("Damage"), Role::Damage);
        assert_eq!(Role::classify("bench"), Role::Damage);
        assert_eq!(Role::classify(""), Role::Damage);
    }

    #[test]
    fn looks_up_specs() {
        let blood = super::spec("death_knight", "blood").unwrap();
        assert_eq!(blood.role, Role::Tank);
        assert_eq!(blood.label(), "Blood");

        let holy = super::spec("priest", "holy").unwrap();
        assert_eq!(holy.label(), "Holy Priest");

        assert!(super::spec("priest", "blood").is_none());
        assert!(super::spec("bard", "lute").is_none());
    }

    #[test]
    fn catalog_is_complete() {
        assert_eq!(CLASSES.len(), 13);
        assert!(CLASSES.iter().all(|class| !class.specs.is_empty()));
        assert_eq!(catalog_position("death_knight"), 0);
        assert_eq!(catalog_position("unknown"), CLASSES.len());
    }
}
