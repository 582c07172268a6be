use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use roster::domain::{
    heatmap::{self, GridRow},
    timezone::timezone_label,
};
use tracing::instrument;

use super::{OutputFormat, load, slot_index, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show aggregated availability in a viewer's timezone")]
pub struct Heatmap {
    /// Viewer timezone (IANA name, e.g. America/New_York)
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Hide cells with fewer available players than this
    #[arg(long, value_name = "N", default_value_t = 0)]
    min: usize,
}

impl Heatmap {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;
        let index = slot_index(directory.config(), &self.tz)?;
        let map = heatmap::Heatmap::aggregate(directory.pool().players());
        let grid = map.grid(&index);

        match self.output {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "timezone": self.tz,
                    "week": index.week(),
                    "players": map.player_count(),
                    "rows": grid,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!(
                    "Availability of {} players, {}",
                    map.player_count(),
                    timezone_label(index.timezone(), Utc::now())
                );
                println!("Raid: {}", index.localized_sessions(&directory.config().sessions));
                println!();
                self.output_table(&grid);
            }
        }

        Ok(())
    }

    /// One line per local half hour, one column per display day. Rows run
    /// from noon to noon, so the morning half of each column is the next
    /// calendar day.
    fn output_table(&self, grid: &[GridRow]) {
        print!("{:<6}", "");
        for row in grid {
            print!("{:>5}", row.day.short_name());
        }
        println!();

        for (column, time) in heatmap::display_columns().enumerate() {
            let label = time.to_string();
            print!("{label:<6}");
            for row in grid {
                let cell = &row.cells[column];
                let marker = if cell.raid { '*' } else { ' ' };
                let text = if cell.count == 0 || cell.count < self.min {
                    format!("{:>4}{marker}", "·")
                } else {
                    format!("{:>4}{marker}", cell.count)
                };
                print!("{}", text.heat(cell.intensity));
            }
            println!();
        }

        println!();
        println!("{}", "* raid time; rows before 12:00 belong to the next day".dim());
    }
}
