//! Stop command handlers.

use tabled::Tabled;

use transitly_core::{Arrival, RouteId, SnapshotView, Stop, StopId};

use crate::cli::{GlobalOpts, OutputFormat, StopsArgs, StopsCommand};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct StopRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Routes")]
    routes: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Arrivals")]
    arrivals: usize,
}

impl From<&&Stop> for StopRow {
    fn from(s: &&Stop) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            routes: join_routes(&s.routes),
            next: s
                .next_arrivals
                .first()
                .map_or_else(|| "-".into(), |a| format!("{} in {}", a.route, a.eta)),
            arrivals: s.next_arrivals.len(),
        }
    }
}

#[derive(Tabled)]
struct ArrivalRow {
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "Feed")]
    feed: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
}

impl ArrivalRow {
    fn new(a: &Arrival, view: &SnapshotView, color: bool) -> Self {
        Self {
            route: a.route.to_string(),
            eta: a.eta.to_string(),
            feed: output::badge(a.badge(view.delay_for(a)), color),
            vehicle: a
                .vehicle_id
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
        }
    }
}

fn join_routes(routes: &[RouteId]) -> String {
    routes
        .iter()
        .map(RouteId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail(s: &Stop, view: &SnapshotView, color: bool) -> String {
    let rows: Vec<ArrivalRow> = s
        .next_arrivals
        .iter()
        .map(|a| ArrivalRow::new(a, view, color))
        .collect();
    [
        format!("ID:        {}", s.id),
        format!("Name:      {}", s.name),
        format!("Position:  {}", util::coords(s.position.lat, s.position.lng)),
        format!("Routes:    {}", join_routes(&s.routes)),
        format!("Updated:   {}", s.last_updated.format("%H:%M:%S UTC")),
        output::render_table(&rows),
    ]
    .join("\n")
}

fn render_stops(format: OutputFormat, stops: &[&Stop]) -> String {
    output::render_list(format, stops, |s| StopRow::from(s), |s| s.id.to_string())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(cfg: &Config, args: StopsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let view = util::snapshot(cfg, global).await?;

    match args.command {
        StopsCommand::List { route } => {
            let route = route.map(RouteId::from);
            let stops: Vec<&Stop> = match &route {
                Some(r) => view.stops_serving(r).collect(),
                None => view.stops.iter().collect(),
            };
            output::print_output(&render_stops(global.format(), &stops), global.quiet);
            Ok(())
        }

        StopsCommand::Get { stop } => {
            let color = output::should_color(global.color_mode());
            let found = view
                .stop(&StopId::from(stop.as_str()))
                .ok_or_else(|| CliError::not_found("stop", stop.clone()))?;
            let out = output::render_single(
                global.format(),
                found,
                |s| detail(s, &view, color),
                |s| {
                    s.next_arrivals
                        .iter()
                        .map(|a| format!("{} {}", a.route, a.eta))
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
