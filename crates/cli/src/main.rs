//! Sightline CLI
//!
//! Command-line inspector for the screen geometry engine.
//!
//! Every invocation selects the platform backend once, runs one query
//! against it, and prints the result as text or JSON.

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use serde::Serialize;
use sightline_geometry::{GlobalBounds, Point, Rect, WindowId, WindowVisibility};
use sightline_platform::{CapabilityTier, ScreenQuery, WindowScope};
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sightline")]
#[command(author, version, about = "Inspect screen and window geometry")]
struct Cli {
    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the selected backend and its capability tier
    Capability,
    /// List monitor rectangles and the global display bounds
    Monitors,
    /// List windows front to back
    Windows {
        /// Include minimized and off-screen windows (unordered)
        #[arg(long)]
        all: bool,
    },
    /// Compute visibility ratios for the on-screen windows
    Visibility,
    /// Identify the window under a screen-space point
    #[command(allow_negative_numbers = true)]
    At {
        /// X coordinate, top-left origin
        x: f64,
        /// Y coordinate, top-left origin
        y: f64,
    },
    /// Check whether a window id still exists
    Exists {
        /// Backend window id
        id: WindowId,
    },
    /// Poll visibility at a fixed cadence
    Watch {
        /// Milliseconds between polls (overrides the configured value)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for log level)
    let mut config = Config::load().unwrap_or_else(|e| {
        // Can't use tracing yet, fall back to eprintln
        eprintln!("Failed to load configuration: {}. Using defaults.", e);
        Config::default()
    });

    let log_level = match config.behavior.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let warnings = config.validate();
    for w in &warnings {
        warn!("Config: {} - {}", w.field, w.message);
    }

    let query = ScreenQuery::detect_with(config.denylist())?;

    match cli.command {
        Commands::Capability => cmd_capability(&query, cli.json),
        Commands::Monitors => cmd_monitors(&query, cli.json),
        Commands::Windows { all } => cmd_windows(&query, all, cli.json),
        Commands::Visibility => cmd_visibility(&query, cli.json),
        Commands::At { x, y } => cmd_at(&query, Point::new(x, y), cli.json),
        Commands::Exists { id } => cmd_exists(&query, id, cli.json),
        Commands::Watch { interval_ms } => {
            let interval = interval_ms.unwrap_or(config.watch.interval_ms);
            cmd_watch(&query, interval, cli.json)
        }
    }
}

#[derive(Serialize)]
struct CapabilityReport<'a> {
    backend: &'a str,
    tier: CapabilityTier,
    window_queries: bool,
}

fn cmd_capability(query: &ScreenQuery, json: bool) -> Result<()> {
    let report = CapabilityReport {
        backend: query.backend_name(),
        tier: query.capability(),
        window_queries: query.capability().has_window_queries(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("Backend: {}", report.backend);
    println!("Tier: {:?}", report.tier);
    println!(
        "Window queries: {}",
        if report.window_queries { "yes" } else { "no" }
    );
    Ok(())
}

#[derive(Serialize)]
struct MonitorReport {
    monitors: Vec<Rect>,
    global_bounds: GlobalBounds,
}

fn cmd_monitors(query: &ScreenQuery, json: bool) -> Result<()> {
    let monitors = query.list_monitors()?;
    let report = MonitorReport {
        global_bounds: GlobalBounds::from_monitors(&monitors),
        monitors,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    for (i, m) in report.monitors.iter().enumerate() {
        println!(
            "Monitor {}: {:.0}x{:.0} at ({:.0}, {:.0})",
            i, m.width, m.height, m.left, m.top
        );
    }
    let b = &report.global_bounds;
    if b.is_empty() {
        println!("No monitors reported");
    } else {
        println!(
            "Global bounds: ({:.0}, {:.0}) to ({:.0}, {:.0})",
            b.min_x, b.min_y, b.max_x, b.max_y
        );
    }
    Ok(())
}

fn cmd_windows(query: &ScreenQuery, all: bool, json: bool) -> Result<()> {
    let scope = if all {
        WindowScope::All
    } else {
        WindowScope::OnScreenOnly
    };
    let windows = query.list_windows(scope)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&windows)?);
        return Ok(());
    }
    if windows.is_empty() {
        println!("No windows reported");
        if !query.capability().has_window_queries() {
            println!(
                "(window queries are unavailable on the {} backend)",
                query.backend_name()
            );
        }
        return Ok(());
    }
    for w in &windows {
        let bounds = match w.bounds {
            Some(b) => format!(
                "{:.0}x{:.0} at ({:.0}, {:.0})",
                b.width, b.height, b.left, b.top
            ),
            None => "no bounds".to_string(),
        };
        println!("[{}] {} {:?} {}", w.id, w.owner, w.title, bounds);
    }
    Ok(())
}

fn cmd_visibility(query: &ScreenQuery, json: bool) -> Result<()> {
    let results = query.visible_windows()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    print_visibility(&results, query);
    Ok(())
}

fn print_visibility(results: &[WindowVisibility], query: &ScreenQuery) {
    if results.is_empty() {
        if query.capability().has_window_queries() {
            println!("No visible windows");
        } else {
            println!(
                "No visible windows ({} backend has no window queries)",
                query.backend_name()
            );
        }
        return;
    }
    for v in results {
        let bounds = v
            .window
            .bounds
            .map(|b| {
                format!(
                    "{:.0}x{:.0} at ({:.0}, {:.0})",
                    b.width, b.height, b.left, b.top
                )
            })
            .unwrap_or_else(|| "no bounds".to_string());
        println!(
            "{:>5.1}%  [{}] {} {}",
            v.ratio * 100.0,
            v.window.id,
            v.window.owner,
            bounds
        );
    }
}

#[derive(Serialize)]
struct PointHit {
    id: WindowId,
    owner: String,
}

fn cmd_at(query: &ScreenQuery, point: Point, json: bool) -> Result<()> {
    let hit = query.topmost_at(point)?;
    if json {
        let report = hit.map(|(id, owner)| PointHit { id, owner });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    match hit {
        Some((id, owner)) => println!("[{}] {}", id, owner),
        None => println!("No window at ({}, {})", point.x, point.y),
    }
    Ok(())
}

fn cmd_exists(query: &ScreenQuery, id: WindowId, json: bool) -> Result<()> {
    let exists = query.window_exists(id)?;
    if json {
        println!("{}", serde_json::to_string(&exists)?);
        return Ok(());
    }
    if exists && !query.capability().has_window_queries() {
        println!(
            "true (assumed; the {} backend cannot enumerate windows)",
            query.backend_name()
        );
    } else {
        println!("{}", exists);
    }
    Ok(())
}

fn cmd_watch(query: &ScreenQuery, interval_ms: u64, json: bool) -> Result<()> {
    let interval = Duration::from_millis(interval_ms);
    info!("Polling visibility every {}ms; Ctrl-C to stop", interval_ms);
    loop {
        match query.visible_windows() {
            Ok(results) => {
                if json {
                    println!("{}", serde_json::to_string(&results)?);
                } else {
                    println!("--- {} visible ---", results.len());
                    print_visibility(&results, query);
                }
            }
            // A transient backend failure must not kill the watch.
            Err(e) => warn!("Visibility poll failed: {}", e),
        }
        std::thread::sleep(interval);
    }
}
