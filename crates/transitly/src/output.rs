//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use transitly_core::{ConnectionStatus, FeedBadge};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Human status label, tinted by severity.
pub fn status_label(status: ConnectionStatus, color: bool) -> String {
    let label = status.label();
    if !color {
        return label.to_owned();
    }
    match status {
        ConnectionStatus::Connected => label.green().to_string(),
        ConnectionStatus::Connecting => label.yellow().to_string(),
        ConnectionStatus::Error => label.red().bold().to_string(),
        ConnectionStatus::Disconnected => label.dimmed().to_string(),
    }
}

pub fn badge(badge: FeedBadge, color: bool) -> String {
    let text = badge.to_string();
    if !color {
        return text;
    }
    match badge {
        FeedBadge::Live => text.green().to_string(),
        FeedBadge::Delayed(_) => text.yellow().to_string(),
        FeedBadge::Schedule => text.dimmed().to_string(),
    }
}

/// "12s ago", "4m ago", "2h ago"; "never" before the first update.
pub fn age(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = last_update else {
        return "never".into();
    };
    let secs = (now - at).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views are
/// key/value listings rather than tables.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn age_buckets() {
        let now = Utc::now();
        assert_eq!(age(None, now), "never");
        assert_eq!(age(Some(now - Duration::seconds(12)), now), "12s ago");
        assert_eq!(age(Some(now - Duration::seconds(250)), now), "4m ago");
        assert_eq!(age(Some(now - Duration::hours(2)), now), "2h ago");
        assert_eq!(age(Some(now + Duration::seconds(3)), now), "0s ago");
    }

    #[test]
    fn plain_labels_without_color() {
        assert_eq!(
            status_label(ConnectionStatus::Error, false),
            "Connection error"
        );
        assert_eq!(badge(FeedBadge::Delayed(2), false), "+2 min");
    }

    #[test]
    fn plain_format_lists_ids() {
        #[derive(serde::Serialize, Tabled)]
        struct Item {
            id: String,
        }
        let items = [Item { id: "a".into() }, Item { id: "b".into() }];
        let out = render_list(
            OutputFormat::Plain,
            &items,
            |i| Item { id: i.id.clone() },
            |i| i.id.clone(),
        );
        assert_eq!(out, "a\nb");
    }
}
