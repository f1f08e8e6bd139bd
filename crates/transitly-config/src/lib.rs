//! Shared configuration for transitly.
//!
//! TOML file + `TRANSITLY_*` environment overrides, and translation to
//! `transitly_core::SimulatorConfig`. The CLI adds `GlobalOpts`-aware
//! overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use transitly_core::{SimulationTuning, SimulatorConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// City simulated when `--city` is not given.
    pub default_city: Option<String>,

    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Simulator timing and tuning.
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: Some(DEFAULT_CITY.into()),
            defaults: Defaults::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

pub const DEFAULT_CITY: &str = "sf";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// `[simulation]` table. Durations are whole milliseconds; zero disables
/// the corresponding timer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub update_interval_ms: u64,
    pub connection_interval_ms: u64,
    pub refresh_delay_ms: u64,
    pub handshake_delay_ms: u64,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    pub tuning: SimulationTuning,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let core = SimulatorConfig::default();
        Self {
            update_interval_ms: millis(core.update_interval),
            connection_interval_ms: millis(core.connection_interval),
            refresh_delay_ms: millis(core.refresh_delay),
            handshake_delay_ms: millis(core.handshake_delay),
            seed: core.seed,
            tuning: core.tuning,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// The city to simulate when none is requested explicitly.
    pub fn city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    /// Build the core simulator configuration, rejecting invalid tuning.
    pub fn simulator_config(&self) -> Result<SimulatorConfig, ConfigError> {
        let sim = &self.simulation;
        let config = SimulatorConfig {
            update_interval: Duration::from_millis(sim.update_interval_ms),
            connection_interval: Duration::from_millis(sim.connection_interval_ms),
            refresh_delay: Duration::from_millis(sim.refresh_delay_ms),
            handshake_delay: Duration::from_millis(sim.handshake_delay_ms),
            seed: sim.seed,
            tuning: sim.tuning.clone(),
        };
        config.validate().map_err(|e| ConfigError::Validation {
            field: "simulation.tuning".into(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "transitly", "transitly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("transitly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TRANSITLY_").split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still honoring environment overrides.
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
