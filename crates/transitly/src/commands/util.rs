//! Shared helpers for command handlers.

use transitly_core::{Controller, SnapshotView};

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;

/// Run a timer-free session for the active city, apply `--ticks` update
/// passes, and return the resulting state.
pub async fn snapshot(cfg: &Config, global: &GlobalOpts) -> Result<SnapshotView, CliError> {
    let sim = config::simulator_config(global, cfg)?;
    let city = config::active_city(global, cfg);
    let ticks = global.ticks;

    let view = Controller::oneshot(sim, &city, |controller| async move {
        for _ in 0..ticks {
            controller.tick();
        }
        Ok(controller.get_snapshot())
    })
    .await?;
    Ok(view)
}

/// Format a coordinate pair for tables.
pub fn coords(lat: f64, lng: f64) -> String {
    format!("{lat:.5}, {lng:.5}")
}
