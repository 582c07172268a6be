use std::path::PathBuf;

use clap::Parser;
use roster::{CompositionAnalyzer, domain::Role};
use tracing::instrument;

use super::{
    OutputFormat, load,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show player, roster and role totals")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;
        let roster = directory.load_roster()?;
        let pool = directory.pool();

        if pool.is_empty() && roster.is_empty() {
            println!("No player submissions found yet. Add files under 'players/'.");
            return Ok(());
        }

        let report =
            CompositionAnalyzer::new(directory.capabilities(), directory.config())
                .analyze(roster.entries());
        let bench = pool.bench(&roster).len();

        match self.output {
            OutputFormat::Json => {
                let roles: Vec<_> = report
                    .roles
                    .iter()
                    .map(|role| {
                        serde_json::json!({
                            "role": role.role,
                            "count": role.count,
                            "target": role.target,
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "players": pool.len(),
                    "rostered": report.total,
                    "raid_size": report.raid_size,
                    "bench": bench,
                    "roles": roles,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table if self.quiet => {
                println!(
                    "players={} rostered={} bench={} tank={} healer={} damage={}",
                    pool.len(),
                    report.total,
                    bench,
                    report.role_count(Role::Tank),
                    report.role_count(Role::Healer),
                    report.role_count(Role::Damage),
                );
            }
            OutputFormat::Table => {
                println!("Raid status");
                println!("{}", "───────────".dim());
                println!("Players:  {}", pool.len());
                println!("Rostered: {}/{}", report.total, report.raid_size);
                println!("Bench:    {bench}");
                println!();

                let narrow = is_narrow();
                for role in &report.roles {
                    let count = format!("{}/{}", role.count, role.target);
                    let count = if role.over_target {
                        count.warning()
                    } else if role.count == role.target {
                        count.success()
                    } else {
                        count
                    };
                    if narrow {
                        println!("{}: {count}", role.role);
                    } else {
                        println!("{:<8} {count}", role.role.to_string());
                    }
                }
            }
        }

        Ok(())
    }
}
