use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use bahn_route::cache::{CachedTimetableClient, ResponseCache};
use bahn_route::config::AppConfig;
use bahn_route::domain::parse_clock;
use bahn_route::planner::{ItineraryPlanner, ResolverConfig};
use bahn_route::render::{write_json, write_table};
use bahn_route::route::RouteFile;
use bahn_route::timetable::{DEFAULT_TIMEOUT_SECS, TimetableClient};

/// Look up the next trains along a saved route
#[derive(Parser)]
#[command(name = "bahn")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Route name in the routes directory, or a path to a route file
    route: Option<String>,

    /// Start time as HHMM (defaults to now)
    start: Option<String>,

    /// Configuration directory (default: ~/.config/bahn)
    #[arg(long, env = "BAHN_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Timetable API base URL
    #[arg(long, env = "BAHN_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Print the itinerary as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "No route given")?;
    writeln!(out, "USAGE: bahn [OPTIONS] [ROUTE] [START]")?;
    writeln!(out)?;
    writeln!(out, "Example:")?;
    writeln!(out, "  bahn hw 0730")?;
    writeln!(out, "Looks for the next trip along route hw after 07:30")
}

/// Start time from an `HHMM` argument on today's date, or now.
fn start_time(arg: Option<&str>, now: DateTime<Local>) -> DateTime<Local> {
    let Some(arg) = arg else {
        return now;
    };

    match parse_clock(arg, now.date_naive()) {
        Ok(start) => start,
        Err(e) => {
            warn!(error = %e, "Could not parse start time, using now");
            now
        }
    }
}

fn app_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config_dir {
        Some(dir) => AppConfig::new(dir),
        None => AppConfig::from_home()?,
    };
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    Ok(config.with_timeout(cli.timeout))
}

async fn run<W: Write>(cli: &Cli, route: &str, out: &mut W) -> anyhow::Result<()> {
    let config = app_config(cli)?;
    let start = start_time(cli.start.as_deref(), Local::now());

    let token = config.load_token()?;
    let client = TimetableClient::new(config.timetable_config(token))
        .context("failed to create timetable client")?;

    let disk = ResponseCache::new(config.cache_dir()).with_ttl(config.cache_ttl);

    // Unsupervised: outcome is only logged
    let evictor = disk.clone();
    tokio::task::spawn_blocking(move || {
        let report = evictor.evict_expired();
        debug!(
            removed = report.removed,
            failed = report.failed,
            "Cache eviction finished"
        );
    });

    let route_file = RouteFile::locate(route, &config.routes_dir());
    let directives = route_file.load()?;
    info!(
        route = %route_file.path().display(),
        directives = directives.len(),
        start = %start,
        "Loaded route"
    );

    let provider = CachedTimetableClient::new(client, disk);
    let resolver_config = ResolverConfig::default();
    let planner = ItineraryPlanner::new(&provider, &resolver_config);
    let itinerary = planner.plan(&directives, start).await?;

    if cli.json {
        write_json(out, &itinerary.stops)?;
    } else {
        write_table(out, &itinerary.stops)?;
    }
    out.flush()?;

    Ok(())
}

/// Usage without a route, otherwise the planned itinerary. Errors go to the
/// log only; `out` receives nothing on failure.
async fn execute<W: Write>(cli: &Cli, out: &mut W) -> ExitCode {
    let Some(route) = cli.route.as_deref() else {
        if let Err(e) = write_usage(out) {
            error!("{e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    match run(cli, route, out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    execute(&cli, &mut std::io::stdout().lock()).await
}
