//! Live mode: run the simulator timers and print every committed change.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, Interval, interval_at, sleep_until};
use tracing::{debug, info};

use transitly_core::{Controller, SnapshotView, TransitSnapshot};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub async fn handle(cfg: &Config, args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let sim = config::simulator_config(global, cfg)?;
    let city = config::active_city(global, cfg);
    let color = output::should_color(global.color_mode());
    let format = global.format();

    let controller = Controller::new(sim);
    controller.start(&city)?;
    let mut stream = controller.subscribe();
    emit(stream.current(), format, color, global.quiet);

    let deadline = sleep_or_forever(args.duration.map(Duration::from_secs));
    tokio::pin!(deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut refresh = args
        .refresh_every
        .filter(|secs| *secs > 0)
        .map(|secs| {
            let period = Duration::from_secs(secs);
            interval_at(Instant::now() + period, period)
        });

    loop {
        tokio::select! {
            () = &mut deadline => {
                debug!("watch duration elapsed");
                break;
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            () = next_refresh(refresh.as_mut()) => controller.refresh_data(),
            changed = stream.changed() => match changed {
                Some(snapshot) => emit(&snapshot, format, color, global.quiet),
                None => break,
            },
        }
    }

    controller.stop().await;
    emit(&controller.snapshot(), format, color, global.quiet);
    Ok(())
}

async fn sleep_or_forever(duration: Option<Duration>) {
    match duration {
        Some(d) => sleep_until(Instant::now() + d).await,
        None => future::pending().await,
    }
}

async fn next_refresh(interval: Option<&mut Interval>) {
    match interval {
        Some(i) => {
            i.tick().await;
        }
        None => future::pending().await,
    }
}

fn emit(snapshot: &Arc<TransitSnapshot>, format: OutputFormat, color: bool, quiet: bool) {
    let view = SnapshotView::from(Arc::clone(snapshot));
    let line = match format {
        // One document per change so the stream stays line-parseable.
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_single(
            OutputFormat::JsonCompact,
            &view,
            |_| String::new(),
            |_| String::new(),
        ),
        OutputFormat::Yaml => format!(
            "---\n{}",
            output::render_single(OutputFormat::Yaml, &view, |_| String::new(), |_| String::new())
                .trim_end()
        ),
        OutputFormat::Plain => format!("{} {}", view.connection_status, view.update_count),
        OutputFormat::Table => summary_line(&view, color),
    };
    output::print_output(&line, quiet);
}

fn summary_line(view: &SnapshotView, color: bool) -> String {
    let now = Utc::now();
    let delayed = view.buses.iter().filter(|b| b.delay.is_some()).count();
    format!(
        "[{}] {:<22} updates {:>3} · {} buses ({} delayed) · {} stops · data {}",
        now.format("%H:%M:%S"),
        output::status_label(view.connection_status, color),
        view.update_count,
        view.buses.len(),
        delayed,
        view.stops.len(),
        output::age(view.last_update, now),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use transitly_core::seed;

    #[test]
    fn summary_line_mentions_status_and_counts() {
        let view = SnapshotView::from(Arc::new(seed::dataset("sf", Utc::now())));
        let line = summary_line(&view, false);
        assert!(line.contains("Connecting..."));
        assert!(line.contains("2 buses"));
        assert!(line.contains("3 stops"));
        assert!(line.contains("data never"));
    }
}
