use std::path::PathBuf;

use clap::Parser;
use roster::{
    CompositionAnalyzer, CompositionReport,
    domain::classes,
};
use tracing::instrument;

use super::{
    OutputFormat, load,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser)]
#[command(about = "Analyse the composition of the current roster")]
pub struct Comp {
    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// List every provider of each utility
    #[arg(long)]
    contributors: bool,
}

impl Comp {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;
        let roster = directory.load_roster()?;
        let report = CompositionAnalyzer::new(directory.capabilities(), directory.config())
            .analyze(roster.entries());

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => self.output_table(&report),
        }
        Ok(())
    }

    fn output_table(&self, report: &CompositionReport) {
        println!("Roster {}/{}", report.total, report.raid_size);
        println!("{}", "───────────".dim());
        for role in &report.roles {
            let count = format!("{}/{}", role.count, role.target);
            let count = if role.over_target { count.warning() } else { count };
            print!("{}: {count}  ", role.role);
        }
        println!();
        println!();

        println!("Classes");
        for class in report.classes.iter().filter(|class| class.count > 0) {
            let name = classes::class(&class.class).map_or(class.class.as_str(), |info| info.name);
            println!("  {name:<14} {}", class.count);
        }
        println!();

        println!("Armor");
        for (armor, count) in &report.armor {
            println!("  {:<8} {count}", armor.label());
        }
        println!("Tier tokens");
        for (token, count) in &report.tier_tokens {
            println!("  {:<40} {count}", token.label());
        }
        println!();

        println!("Buffs");
        for buff in &report.buffs {
            println!("  {} {buff}", "✓".success());
        }
        for buff in &report.missing_buffs {
            println!("  {} {}", "✗".warning(), buff.label().dim());
        }
        println!();

        println!("Key utilities");
        for (utility, count) in &report.key_utilities {
            let text = count.to_string();
            let text = if *count == 0 { text.warning() } else { text.info() };
            println!("  {:<24} {text}", utility.label());
        }
        for metric in &report.stacking {
            println!(
                "  {:<24} {}/{}",
                metric.utility.label(),
                metric.value,
                metric.cap
            );
        }
        println!();

        println!("Utilities");
        let narrow = is_narrow();
        for (utility, tally) in &report.utilities {
            if self.contributors && !narrow {
                let names: Vec<_> = tally.contributors.iter().map(|c| c.name.as_str()).collect();
                println!(
                    "  {:<28} {:>2}  {}",
                    utility.label(),
                    tally.count,
                    names.join(", ").dim()
                );
            } else {
                println!("  {:<28} {:>2}", utility.label(), tally.count);
            }
        }
    }
}
