use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use regex::Regex;
use roster::{
    SlotIndex,
    domain::{CoverageStatus, SessionCoverage},
};
use tracing::instrument;

use super::{OutputFormat, load, slot_index, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show how much of each raid session every player can attend")]
pub struct Coverage {
    /// Show ranges in this timezone instead of each player's own
    #[arg(long)]
    tz: Option<String>,

    /// Only show players whose name matches this regular expression
    #[arg(long, value_name = "REGEX")]
    filter: Option<String>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Coverage {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let filter = self
            .filter
            .as_deref()
            .map(|pattern| Regex::new(pattern).with_context(|| format!("invalid regex: {pattern}")))
            .transpose()?;

        let directory = load(root)?;
        let config = directory.config();

        let mut indices: BTreeMap<String, SlotIndex> = BTreeMap::new();
        let mut rows = Vec::new();
        for player in directory.pool().players() {
            if filter.as_ref().is_some_and(|regex| !regex.is_match(&player.name)) {
                continue;
            }
            let timezone = self
                .tz
                .clone()
                .unwrap_or_else(|| player.availability.timezone.clone());
            if !indices.contains_key(&timezone) {
                let index = slot_index(config, &timezone)
                    .with_context(|| format!("player '{}'", player.name))?;
                indices.insert(timezone.clone(), index);
            }
            let index = &indices[&timezone];
            let sessions =
                SessionCoverage::for_calendar(&player.availability.schedule, &config.sessions, index);
            rows.push((player, timezone, sessions));
        }

        match self.output {
            OutputFormat::Json => {
                let output: Vec<_> = rows
                    .iter()
                    .map(|(player, timezone, sessions)| {
                        let sessions: Vec<_> = sessions
                            .iter()
                            .map(|coverage| {
                                serde_json::json!({
                                    "session": coverage.session.to_string(),
                                    "status": coverage.status,
                                    "available": coverage.available,
                                    "total": coverage.total,
                                    "ranges": coverage.ranges,
                                    "summary": coverage.to_string(),
                                })
                            })
                            .collect();
                        serde_json::json!({
                            "player": player.name,
                            "timezone": timezone,
                            "sessions": sessions,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    println!("No matching players.");
                }
                for (player, timezone, sessions) in &rows {
                    println!("{} {}", player.name, format!("({timezone})").dim());
                    for coverage in sessions {
                        let label = indices[timezone].localize(&coverage.session).label();
                        let status = coverage.status.to_string();
                        let status = match coverage.status {
                            CoverageStatus::Full => status.success(),
                            CoverageStatus::Partial => status.warning(),
                            CoverageStatus::None => status.dim(),
                        };
                        println!("  {label:<16} {status:<8} {coverage}");
                    }
                }
            }
        }

        Ok(())
    }
}
