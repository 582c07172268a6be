use std::path::PathBuf;

mod caps;
mod comp;
mod coverage;
mod heatmap;
mod roster;
mod status;
mod terminal;
mod tz;

use anyhow::Context;
use caps::Caps;
use clap::ArgAction;
use comp::Comp;
use coverage::Coverage;
use heatmap::Heatmap;
use self::roster::RosterCommand;
use status::Status;
use tracing::instrument;
use tz::Tz;

use ::roster::{
    Config, Directory, SlotIndex,
    domain::timezone::parse_timezone,
    storage::Loaded,
};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the raid data directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show player and roster totals (default)
    Status(Status),

    /// Create a configuration file and players directory
    Init,

    /// Show aggregated availability in a viewer's timezone
    Heatmap(Heatmap),

    /// Show how much of each raid session every player can attend
    Coverage(Coverage),

    /// Analyse the composition of the current roster
    Comp(Comp),

    /// Show what a class or spec brings to the raid
    Caps(Caps),

    /// Show or change the roster
    #[command(subcommand)]
    Roster(RosterCommand),

    /// Show raid times and raid cells in a timezone
    Tz(Tz),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init => init(root)?,
            Self::Heatmap(command) => command.run(root)?,
            Self::Coverage(command) => command.run(root)?,
            Self::Comp(command) => command.run(root)?,
            Self::Caps(command) => command.run(root)?,
            Self::Roster(command) => command.run(root)?,
            Self::Tz(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[instrument]
fn init(root: PathBuf) -> anyhow::Result<()> {
    let directory = Directory::new(root);
    let created = directory.init().context("failed to initialize data directory")?;

    if created {
        println!("Initialized raid data in {}", directory.root().display());
        println!("  Created: roster.toml");
    } else {
        println!("Configuration already present in {}", directory.root().display());
    }
    println!("  Players: {}", directory.players_path().display());
    Ok(())
}

/// Output format for commands with machine readable output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn load(root: PathBuf) -> anyhow::Result<Directory<Loaded>> {
    Directory::new(root)
        .load_all()
        .context("failed to load raid data")
}

/// Builds the slot index for a viewer timezone, using the configured
/// reference week.
fn slot_index(config: &Config, timezone: &str) -> anyhow::Result<SlotIndex> {
    let timezone = parse_timezone(timezone)?;
    Ok(SlotIndex::for_week(
        timezone,
        &config.sessions,
        config.reference_week(),
    ))
}
