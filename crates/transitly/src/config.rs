//! CLI configuration: thin wrapper around `transitly_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--city, --seed, --output, --color).

use clap::ValueEnum;
use tracing::warn;

use transitly_core::{SimulatorConfig, find_city};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use transitly_config::{Config, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill `--output` / `--color` from the config file when not given.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    if global.output.is_none() {
        global.output = Some(parse_value::<OutputFormat>("defaults.output", &cfg.defaults.output)?);
    }
    if global.color.is_none() {
        global.color = Some(parse_value::<ColorMode>("defaults.color", &cfg.defaults.color)?);
    }
    Ok(())
}

fn parse_value<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Resolve the city from flag > env > config.
pub fn active_city(global: &GlobalOpts, cfg: &Config) -> String {
    let city = global
        .city
        .clone()
        .unwrap_or_else(|| cfg.city().to_owned());
    if find_city(&city).is_none() {
        warn!(city = %city, "city is not in the supported catalog, using default dataset");
    }
    city
}

/// Translate the config file + global flags into a `SimulatorConfig`.
///
/// `--seed` takes priority over `simulation.seed`.
pub fn simulator_config(global: &GlobalOpts, cfg: &Config) -> Result<SimulatorConfig, CliError> {
    let mut sim = cfg.simulator_config()?;
    if global.seed.is_some() {
        sim.seed = global.seed;
    }
    Ok(sim)
}
