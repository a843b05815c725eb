//! Colorful console output for layout searches.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (site and edge search start/end)
//! - **WARN**: Search ceilings hit
//! - **DEBUG**: Committed branches and ranking
//! - **TRACE**: Individual node expansions and pruned branches

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SITE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "parkforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ParkingConsoleLayer)
            .try_init();
    });
}

// Marks the start of a site search for elapsed time tracking.
fn mark_site_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SITE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SITE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
                  _    __
 _ __   __ _ _ __| | _/ _| ___  _ __ __ _  ___
| '_ \ / _` | '__| |/ / |_ / _ \| '__/ _` |/ _ \
| |_) | (_| | |  |   <|  _| (_) | | | (_| |  __/
| .__/ \__,_|_|  |_|\_\_|  \___/|_|  \__, |\___|
|_|                                  |___/
"#;

    let version_line = format!("                   v{} - Parking Row Layout Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats layout search events with colors.
pub struct ParkingConsoleLayer;

impl<S: Subscriber> Layer<S> for ParkingConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("parkforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    edge: Option<u64>,
    edges: Option<u64>,
    catalog_size: Option<u64>,
    seeds: Option<String>,
    threads: Option<String>,
    max_offset: Option<f64>,
    total_width: Option<f64>,
    best: Option<f64>,
    rows: Option<u64>,
    depth: Option<u64>,
    kind: Option<String>,
    reason: Option<String>,
    metric: Option<String>,
    branches: Option<u64>,
    pruned: Option<u64>,
    exhausted: Option<u64>,
    nodes: Option<u64>,
    node_limit: Option<u64>,
    duration_ms: Option<u64>,
}

fn unquote(value: &dyn std::fmt::Debug) -> String {
    format!("{:?}", value).trim_matches('"').to_string()
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "event" => self.event = Some(unquote(value)),
            "seeds" => self.seeds = Some(unquote(value)),
            "threads" => self.threads = Some(unquote(value)),
            "kind" => self.kind = Some(unquote(value)),
            "reason" => self.reason = Some(unquote(value)),
            "metric" => self.metric = Some(unquote(value)),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "max_offset" => self.max_offset = Some(value),
            "total_width" => self.total_width = Some(value),
            "best" => self.best = Some(value),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "edge" => self.edge = Some(value),
            "edges" => self.edges = Some(value),
            "catalog_size" => self.catalog_size = Some(value),
            "rows" => self.rows = Some(value),
            "depth" => self.depth = Some(value),
            "branches" => self.branches = Some(value),
            "pruned" => self.pruned = Some(value),
            "exhausted" => self.exhausted = Some(value),
            "nodes" => self.nodes = Some(value),
            "node_limit" => self.node_limit = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "metric" => self.metric = Some(value.to_string()),
            "kind" => self.kind = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "site_solve_start" => format_site_start(v),
        "site_solve_end" => format_site_end(v),
        "edge_solve_start" => format_edge_start(v),
        "edge_solve_end" => format_edge_end(v),
        "search_limit" => format_search_limit(v),
        "branch_committed" => format_branch_committed(v),
        "rank_end" => format_rank_end(v),
        "node_expanded" | "branch_pruned" => format_trace(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_site_start(v: &EventVisitor) -> String {
    mark_site_start();
    format!(
        "{} {} Planning site │ {} edges │ threads {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.edges).bright_yellow(),
        v.threads.as_deref().unwrap_or("Auto").bright_magenta(),
    )
}

fn format_site_end(v: &EventVisitor) -> String {
    let branches = v.branches.unwrap_or(0);
    let status = if branches > 0 {
        "LAYOUTS FOUND".bright_green().bold().to_string()
    } else {
        "NO FEASIBLE LAYOUT".bright_red().bold().to_string()
    };

    format!(
        "{} {} Site complete │ {} branches │ {} nodes │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.branches).white().bold(),
        count(v.nodes).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        status
    )
}

fn format_edge_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Edge {} started │ depth {} │ {} stall types │ seeds {}",
        format_elapsed(),
        "▶".bright_blue(),
        v.edge.unwrap_or(0).white().bold(),
        format_width(v.max_offset.unwrap_or(0.0)).bright_yellow(),
        count(v.catalog_size).bright_yellow(),
        v.seeds.as_deref().unwrap_or("Both").bright_magenta(),
    )
}

fn format_edge_end(v: &EventVisitor) -> String {
    let nodes = v.nodes.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let speed = if duration > 0 {
        nodes * 1000 / duration
    } else {
        nodes
    };

    format!(
        "{} {} Edge {} ended │ {} │ {} branches │ {} pruned │ {} exhausted │ {} nodes/s",
        format_elapsed(),
        "◀".bright_blue(),
        v.edge.unwrap_or(0).white().bold(),
        format_duration_ms(duration).yellow(),
        count(v.branches).bright_green(),
        count(v.pruned).bright_red(),
        count(v.exhausted).yellow(),
        speed
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
    )
}

fn format_search_limit(v: &EventVisitor) -> String {
    format!(
        "{} {} Edge {} hit node limit {} │ keeping {} branches",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.edge.unwrap_or(0).white().bold(),
        count(v.node_limit).bright_yellow(),
        count(v.branches).white(),
    )
}

fn format_branch_committed(v: &EventVisitor) -> String {
    format!(
        "{} {} Edge {} │ {} rows │ width {} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        v.edge.unwrap_or(0),
        count(v.rows).white(),
        format_width(v.total_width.unwrap_or(0.0)).bright_yellow(),
        v.reason.as_deref().unwrap_or("depth").bright_black(),
    )
}

fn format_rank_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Ranked {} branches by {} │ best {}",
        format_elapsed(),
        "★".bright_cyan(),
        count(v.branches).white(),
        v.metric.as_deref().unwrap_or("metric").bright_magenta(),
        format!("{:.2}", v.best.unwrap_or(0.0)).bright_green().bold(),
    )
}

fn format_trace(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    match v.event.as_deref() {
        Some("branch_pruned") => format!(
            "{} {} Pruned │ {} rows │ width {}",
            format_elapsed(),
            "✗".bright_red(),
            count(v.rows).bright_black(),
            format_width(v.total_width.unwrap_or(0.0)).bright_black(),
        ),
        _ => format!(
            "{} {} Node depth {:>4} │ {:<5} │ width {}",
            format_elapsed(),
            "·".bright_black(),
            v.depth.unwrap_or(0),
            v.kind.as_deref().unwrap_or("?"),
            format_width(v.total_width.unwrap_or(0.0)).bright_black(),
        ),
    }
}

fn format_width(width: f64) -> String {
    format!("{:.2}m", width)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("solve_start".to_string()),
            ..Default::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
    }

    #[test]
    fn test_trace_events_need_trace_level() {
        let v = EventVisitor {
            event: Some("node_expanded".to_string()),
            depth: Some(3),
            ..Default::default()
        };
        assert!(format_event(&v, Level::DEBUG).is_empty());
        assert!(format_event(&v, Level::TRACE).contains("Node depth"));
    }

    #[test]
    fn test_edge_end_mentions_counts() {
        let v = EventVisitor {
            event: Some("edge_solve_end".to_string()),
            edge: Some(2),
            branches: Some(1234),
            duration_ms: Some(0),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("1,234"));
        assert!(line.contains("Edge"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        assert!(INIT.get().is_some());
    }
}
