use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use roster::{
    Roster, RosterChange,
    domain::{RosterEntry, classes},
};
use tracing::instrument;

use super::{load, terminal::Colorize};

#[derive(Debug, Parser)]
pub enum RosterCommand {
    /// List rostered players, then the bench
    List,

    /// Seat a player, on their top-ranked class unless one is given
    Add {
        /// Player id
        player: String,

        /// Class id to play instead of the top-ranked class
        #[arg(long)]
        class: Option<String>,

        /// Spec id
        #[arg(long)]
        spec: Option<String>,
    },

    /// Take a player off the roster
    Remove {
        /// Player id
        player: String,
    },

    /// Switch a player's class (clears their spec)
    Class {
        /// Player id
        player: String,
        /// Class id
        class: String,
    },

    /// Choose a player's spec (sets their role)
    Spec {
        /// Player id
        player: String,
        /// Spec id
        spec: String,
    },

    /// Override a player's role
    Role {
        /// Player id
        player: String,
        /// Role label, e.g. Tank, Healer or Damage
        role: String,
    },

    /// Empty the roster
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl RosterCommand {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;

        let change = match self {
            Self::List => {
                let roster = directory.load_roster()?;
                Self::print(&roster);
                let bench = directory.pool().bench(&roster);
                if !bench.is_empty() {
                    println!();
                    println!("Bench");
                    for player in bench {
                        let class = player.default_class().unwrap_or("-");
                        println!(
                            "  {:<20} {:<12} {}",
                            player.name,
                            player.involvement.to_string(),
                            class.dim()
                        );
                    }
                }
                return Ok(());
            }
            Self::Add {
                player,
                class,
                spec,
            } => {
                let player = directory
                    .pool()
                    .get(&player)
                    .with_context(|| format!("no submission for player '{player}'"))?;
                let mut entry = match class {
                    Some(class) => RosterEntry::new(&player.id, &player.name, class),
                    None => RosterEntry::for_player(player).with_context(|| {
                        format!("'{}' listed no classes, pass --class", player.name)
                    })?,
                };
                if let Some(spec) = spec {
                    anyhow::ensure!(
                        classes::spec(&entry.class_id, &spec).is_some(),
                        "'{spec}' is not a spec of '{}'",
                        entry.class_id
                    );
                    entry = entry.with_spec(&spec);
                }
                RosterChange::Add(entry)
            }
            Self::Remove { player } => RosterChange::Remove(player),
            Self::Class { player, class } => RosterChange::SetClass {
                player_id: player,
                class_id: class,
            },
            Self::Spec { player, spec } => RosterChange::SetSpec {
                player_id: player,
                spec_id: spec,
            },
            Self::Role { player, role } => RosterChange::SetRole {
                player_id: player,
                role,
            },
            Self::Clear { yes } => {
                if !yes
                    && !Confirm::new()
                        .with_prompt("Remove every player from the roster?")
                        .default(false)
                        .interact()?
                {
                    println!("Cancelled");
                    return Ok(());
                }
                RosterChange::Clear
            }
        };

        let roster = directory.update_roster(change)?;
        Self::print(&roster);
        Ok(())
    }

    fn print(roster: &Roster) {
        if roster.is_empty() {
            println!("Roster is empty.");
            return;
        }
        println!("Roster ({})", roster.len());
        for entry in roster.display_order() {
            let class = classes::class(&entry.class_id);
            let spec = entry
                .spec_id
                .as_deref()
                .and_then(|spec| class?.spec(spec))
                .map_or("", |spec| spec.label());
            let class = class.map_or(entry.class_id.as_str(), |class| class.name);
            println!(
                "  {:<8} {:<20} {} {}",
                entry.role,
                entry.name,
                class,
                spec.info()
            );
        }
    }
}
