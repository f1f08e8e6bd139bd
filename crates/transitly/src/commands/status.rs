//! Feed status summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use transitly_core::{ConnectionStatus, SnapshotView, find_city};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    city: String,
    city_name: Option<&'static str>,
    connection_status: ConnectionStatus,
    label: &'static str,
    is_loading: bool,
    has_error: bool,
    last_update: Option<DateTime<Utc>>,
    update_count: u64,
    buses: usize,
    stops: usize,
    routes: usize,
}

impl From<&SnapshotView> for StatusReport {
    fn from(view: &SnapshotView) -> Self {
        Self {
            city: view.city.clone(),
            city_name: find_city(&view.city).map(|c| c.name),
            connection_status: view.connection_status,
            label: view.connection_status.label(),
            is_loading: view.is_loading,
            has_error: view.has_error,
            last_update: view.last_update,
            update_count: view.update_count,
            buses: view.buses.len(),
            stops: view.stops.len(),
            routes: view.routes.len(),
        }
    }
}

fn detail(r: &StatusReport, color: bool) -> String {
    let city = r
        .city_name
        .map_or_else(|| r.city.clone(), |name| format!("{name} ({})", r.city));
    [
        format!("City:        {city}"),
        format!("Status:      {}", output::status_label(r.connection_status, color)),
        format!("Updated:     {}", output::age(r.last_update, Utc::now())),
        format!("Updates:     {}", r.update_count),
        format!("Buses:       {}", r.buses),
        format!("Stops:       {}", r.stops),
        format!("Routes:      {}", r.routes),
    ]
    .join("\n")
}

pub async fn handle(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let view = util::snapshot(cfg, global).await?;
    let report = StatusReport::from(&view);
    let color = output::should_color(global.color_mode());

    let out = output::render_single(
        global.format(),
        &report,
        |r| detail(r, color),
        |r| r.connection_status.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
