use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use roster::{
    SlotIndex,
    domain::timezone::{parse_timezone, timezone_label},
};
use tracing::instrument;

use super::{OutputFormat, load, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show raid times and raid cells in a timezone")]
pub struct Tz {
    /// IANA timezone name, e.g. Europe/Berlin
    zone: String,

    /// Map the week containing this date instead of the reference week
    #[arg(long, value_name = "YYYY-MM-DD")]
    week: Option<NaiveDate>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Tz {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;
        let config = directory.config();
        let timezone = parse_timezone(&self.zone)?;
        let week = self.week.unwrap_or_else(|| config.reference_week());
        let index = SlotIndex::for_date(timezone, &config.sessions, week);

        let label = timezone_label(timezone, Utc::now());
        let sessions: Vec<_> = config
            .sessions
            .sessions()
            .iter()
            .map(|session| index.localize(session))
            .collect();
        let raid_cells: Vec<_> = index.raid_cells().map(|cell| cell.to_string()).collect();
        let gap_cells: Vec<_> = index.gap_cells().map(|cell| cell.to_string()).collect();

        match self.output {
            OutputFormat::Json => {
                let sessions: Vec<_> = sessions
                    .iter()
                    .map(|session| {
                        serde_json::json!({
                            "label": session.label(),
                            "short_label": session.short_label(),
                            "time": session.to_string(),
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "timezone": self.zone,
                    "label": label,
                    "week": index.week(),
                    "uniform": index.is_uniform(),
                    "sessions": sessions,
                    "raid_cells": raid_cells,
                    "gap_cells": gap_cells,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("{}", label.info());
                println!("Week of {}", index.week());
                if !index.is_uniform() {
                    println!("{}", "Clocks change during this week.".warning());
                }
                println!();

                println!("Raids: {}", index.localized_sessions(&config.sessions));
                for session in &sessions {
                    println!("  {} {:<16} {session}", session.short_label(), session.label());
                }
                println!();

                println!("Raid cells ({})", raid_cells.len());
                for cell in &raid_cells {
                    println!("  {cell}");
                }
                if !gap_cells.is_empty() {
                    println!();
                    println!("Skipped local times");
                    for cell in &gap_cells {
                        println!("  {}", cell.dim());
                    }
                }
            }
        }
        Ok(())
    }
}
