use std::path::PathBuf;

use clap::Parser;
use roster::domain::{
    capability::{armor_type, main_stat, tier_token},
    classes,
};
use tracing::instrument;

use super::{OutputFormat, load, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show what a class or spec brings to the raid")]
pub struct Caps {
    /// Class id, e.g. `death_knight`
    class: String,

    /// Spec id, e.g. `blood`
    spec: Option<String>,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Caps {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = load(root)?;
        let class = classes::class(&self.class);
        if class.is_none() {
            tracing::warn!("'{}' is not a known class", self.class);
        }
        if let (Some(class), Some(spec)) = (class, self.spec.as_deref()) {
            if class.spec(spec).is_none() {
                tracing::warn!("'{spec}' is not a spec of {}", class.name);
            }
        }

        let spec = self.spec.as_deref();
        let capabilities = directory.capabilities().resolve(&self.class, spec);
        let armor = armor_type(&self.class);
        let token = tier_token(&self.class);
        let stat = main_stat(&self.class, spec);

        match self.output {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "class": self.class,
                    "spec": spec,
                    "armor": armor,
                    "tier_token": token,
                    "main_stat": stat,
                    "buffs": capabilities.buffs,
                    "utilities": capabilities.utilities,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                let title = match (class, spec.and_then(|spec| class?.spec(spec))) {
                    (Some(class), Some(spec)) => format!("{} {}", spec.name, class.name),
                    (Some(class), None) => class.name.to_string(),
                    _ => self.class.clone(),
                };
                println!("{}", title.info());
                let unknown = || "unknown".dim();
                println!("  Armor:      {}", armor.map_or_else(unknown, |a| a.to_string()));
                println!("  Tier token: {}", token.map_or_else(unknown, |t| t.to_string()));
                println!("  Main stat:  {}", stat.map_or_else(unknown, |s| s.to_string()));

                println!("Buffs");
                if capabilities.buffs.is_empty() {
                    println!("  {}", "none".dim());
                }
                for buff in &capabilities.buffs {
                    println!("  {buff}");
                }
                println!("Utilities");
                if capabilities.utilities.is_empty() {
                    println!("  {}", "none".dim());
                }
                for utility in &capabilities.utilities {
                    println!("  {utility}");
                }
            }
        }
        Ok(())
    }
}
