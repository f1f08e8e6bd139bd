//! Command dispatch: bridges CLI args -> simulator sessions -> output formatting.

pub mod buses;
pub mod cities;
pub mod config_cmd;
pub mod routes;
pub mod status;
pub mod stops;
pub mod util;
pub mod watch;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a simulator-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(cfg, global).await,
        Command::Buses(args) => buses::handle(cfg, args, global).await,
        Command::Stops(args) => stops::handle(cfg, args, global).await,
        Command::Routes(args) => routes::handle(cfg, args, global).await,
        Command::Watch(args) => watch::handle(cfg, args, global).await,
        Command::Cities => {
            cities::handle(global);
            Ok(())
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
