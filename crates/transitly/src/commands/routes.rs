//! Route command handlers.

use tabled::Tabled;

use transitly_core::{Route, SnapshotView};

use crate::cli::{GlobalOpts, RoutesArgs, RoutesCommand};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Stops")]
    stops: usize,
    #[tabled(rename = "Buses")]
    buses: usize,
}

impl RouteRow {
    fn new(route: &Route, view: &SnapshotView) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name.clone(),
            color: route.color.clone(),
            active: route.is_active,
            stops: view.stops_serving(&route.id).count(),
            buses: view.buses.iter().filter(|b| b.route == route.id).count(),
        }
    }
}

pub async fn handle(cfg: &Config, args: RoutesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RoutesCommand::List => {
            let view = util::snapshot(cfg, global).await?;
            let out = output::render_list(
                global.format(),
                view.routes.as_slice(),
                |r| RouteRow::new(r, &view),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
