//! Bus command handlers.

use serde::Serialize;
use tabled::Tabled;

use transitly_core::{Bus, BusId, Eta, RouteId, SnapshotView, StopId};

use crate::cli::{BusesArgs, BusesCommand, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BusRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Heading")]
    heading: String,
    #[tabled(rename = "Speed")]
    speed: u32,
    #[tabled(rename = "Load")]
    occupancy: String,
    #[tabled(rename = "Next Stop")]
    next_stop: String,
    #[tabled(rename = "Feed")]
    feed: String,
}

impl BusRow {
    fn new(b: &Bus, color: bool) -> Self {
        Self {
            id: b.id.to_string(),
            route: b.route.to_string(),
            position: util::coords(b.position.lat, b.position.lng),
            heading: format!("{:.0}°", b.heading),
            speed: b.speed,
            occupancy: b.occupancy.to_string(),
            next_stop: b.next_stop.clone(),
            feed: output::badge(b.badge(), color),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BusDetail<'a> {
    #[serde(flatten)]
    bus: &'a Bus,
    route_name: Option<&'a str>,
    load_percent: u8,
    estimated_passengers: u32,
    feed: String,
    arrivals: Vec<BusArrival<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BusArrival<'a> {
    stop_id: &'a StopId,
    stop_name: &'a str,
    eta: Eta,
}

impl<'a> BusDetail<'a> {
    fn new(bus: &'a Bus, view: &'a SnapshotView) -> Self {
        Self {
            bus,
            route_name: view.route(&bus.route).map(|r| r.name.as_str()),
            load_percent: bus.occupancy.load_percent(),
            estimated_passengers: bus.occupancy.estimated_passengers(),
            feed: bus.badge().to_string(),
            arrivals: view
                .arrivals_for_bus(&bus.id)
                .map(|(stop, arrival)| BusArrival {
                    stop_id: &stop.id,
                    stop_name: &stop.name,
                    eta: arrival.eta,
                })
                .collect(),
        }
    }
}

fn detail(d: &BusDetail<'_>, color: bool) -> String {
    let b = d.bus;
    let mut lines = vec![
        format!("ID:          {}", b.id),
        format!(
            "Route:       {}",
            d.route_name.map_or_else(|| b.route.to_string(), str::to_owned)
        ),
        format!("Position:    {}", util::coords(b.position.lat, b.position.lng)),
        format!("Heading:     {:.1}°", b.heading),
        format!("Speed:       {}", b.speed),
        format!(
            "Load:        {} ({}%, ~{} riders)",
            b.occupancy, d.load_percent, d.estimated_passengers
        ),
        format!("Next stop:   {}", b.next_stop),
        format!("Feed:        {}", output::badge(b.badge(), color)),
        format!("Updated:     {}", b.last_updated.format("%H:%M:%S UTC")),
    ];
    if !d.arrivals.is_empty() {
        lines.push("Arrivals:".into());
        for a in &d.arrivals {
            lines.push(format!("  {:<22} {}", a.stop_name, a.eta));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(cfg: &Config, args: BusesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let view = util::snapshot(cfg, global).await?;
    let color = output::should_color(global.color_mode());

    match args.command {
        BusesCommand::List { route } => {
            let route = route.map(RouteId::from);
            let buses: Vec<&Bus> = view
                .buses
                .iter()
                .filter(|b| route.as_ref().is_none_or(|r| &b.route == r))
                .collect();
            let out = output::render_list(
                global.format(),
                &buses,
                |b| BusRow::new(b, color),
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BusesCommand::Get { bus } => {
            let found = view
                .bus(&BusId::from(bus.as_str()))
                .ok_or_else(|| CliError::not_found("bus", bus.clone()))?;
            let detail_view = BusDetail::new(found, &view);
            let out = output::render_single(
                global.format(),
                &detail_view,
                |d| detail(d, color),
                |d| d.bus.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
