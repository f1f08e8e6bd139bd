//! Clap derive structures for the `transitly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// transitly -- simulated real-time transit feed in your terminal
#[derive(Debug, Parser)]
#[command(
    name = "transitly",
    version,
    about = "Inspect and watch a simulated real-time transit feed",
    long_about = "Runs a local transit simulator (bus positions, stop arrivals, and a \
        flaky live-data connection) and renders its state.\n\n\
        One-shot commands apply --ticks update passes before reading; \
        `watch` runs the live timers and streams every change.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// City to simulate (see `transitly cities`)
    #[arg(long, short = 'c', env = "TRANSITLY_CITY", global = true)]
    pub city: Option<String>,

    /// Seed for a reproducible simulation
    #[arg(long, env = "TRANSITLY_SEED", global = true)]
    pub seed: Option<u64>,

    /// Update passes to apply before reading (one-shot commands)
    #[arg(long, short = 't', default_value = "0", global = true)]
    pub ticks: u32,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "TRANSITLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Feed connection status and update summary
    #[command(alias = "st")]
    Status,

    /// Inspect simulated vehicles
    #[command(alias = "bus", alias = "b")]
    Buses(BusesArgs),

    /// Inspect stops and their upcoming arrivals
    #[command(alias = "stop", alias = "s")]
    Stops(StopsArgs),

    /// Inspect routes
    #[command(alias = "route", alias = "r")]
    Routes(RoutesArgs),

    /// Run the live simulation and print every change
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// List supported cities
    Cities,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BUSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BusesArgs {
    #[command(subcommand)]
    pub command: BusesCommand,
}

#[derive(Debug, Subcommand)]
pub enum BusesCommand {
    /// List vehicles
    #[command(alias = "ls")]
    List {
        /// Only vehicles on this route
        #[arg(long, short = 'r')]
        route: Option<String>,
    },

    /// Show one vehicle and the arrivals it is producing
    Get {
        /// Vehicle ID (e.g. bus1)
        bus: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STOPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StopsArgs {
    #[command(subcommand)]
    pub command: StopsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StopsCommand {
    /// List stops
    #[command(alias = "ls")]
    List {
        /// Only stops served by this route
        #[arg(long, short = 'r')]
        route: Option<String>,
    },

    /// Show one stop with its upcoming arrivals
    Get {
        /// Stop ID (e.g. stop1)
        stop: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROUTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List routes
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many seconds (default: until Ctrl-C)
    #[arg(long, short = 'd')]
    pub duration: Option<u64>,

    /// Request a manual refresh every N seconds
    #[arg(long)]
    pub refresh_every: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
