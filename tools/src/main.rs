//! dash-runner: headless front end for the NeoFactory dashboard core.
//!
//! Usage:
//!   dash-runner --fixture data/factory.json
//!   dash-runner --fixture data/factory.json --data-dir ./data --day 19000
//!   dash-runner --fixture data/factory.json --date 2024-06-01 --snapshot
//!   dash-runner --fixture data/factory.json --ipc-mode

use anyhow::Result;
use chrono::NaiveDate;
use neofactory_core::{
    clock::{day_start, FixedClock, SystemClock, WallClock},
    command::DashQuery,
    config::MetricsConfig,
    filter::FilterState,
    navigation::ViewState,
    Dashboard, Fixture,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let snapshot_mode = args.iter().any(|a| a == "--snapshot");
    let fixture_path = flag_value(&args, "--fixture").unwrap_or("data/factory.json");
    let data_dir = flag_value(&args, "--data-dir");
    let day: Option<i64> = flag_value(&args, "--day").and_then(|d| d.parse().ok());
    let date = flag_value(&args, "--date")
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()?;

    let fixture = Fixture::load(fixture_path)?;
    let config = match data_dir {
        Some(dir) => MetricsConfig::load(dir)?,
        None => MetricsConfig::default(),
    };
    let clock: Box<dyn WallClock> = match (day, date) {
        (Some(day), _) => Box::new(FixedClock::on_day(day)),
        (None, Some(date)) => Box::new(FixedClock::on_date(date)),
        (None, None) => Box::new(SystemClock),
    };
    let dashboard = Dashboard::new(fixture, config, clock);

    if ipc_mode {
        run_ipc_loop(&dashboard)?;
    } else if snapshot_mode {
        println!("{}", dashboard.snapshot().to_json()?);
    } else {
        print_summary(&dashboard, fixture_path);
    }

    Ok(())
}

/// One JSON query per stdin line, one JSON answer per stdout line.
/// The session view state lives for the whole loop.
fn run_ipc_loop(dashboard: &Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut view = ViewState::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }
        let raw: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Rejected line: {e}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };
        if raw["type"] == "quit" {
            break;
        }

        let query: DashQuery = match serde_json::from_value(raw) {
            Ok(q) => q,
            Err(e) => {
                log::warn!("Rejected query: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let answer = match dashboard.answer(query, &mut view) {
            Ok(value) => value,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        writeln!(stdout, "{}", answer)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(dashboard: &Dashboard, fixture_path: &str) {
    let day = dashboard.today();
    let totals = dashboard.totals();
    let date = day_start(day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string());

    println!("NeoFactory dash-runner");
    println!("  fixture:     {fixture_path}");
    println!("  day:         {day} ({date})");
    println!("  sites:       {}", totals.sites);
    println!("  departments: {}", totals.departments);
    println!("  machines:    {}", totals.machines);
    println!("  cities:      {}", dashboard.city_options().join(", "));
    println!();

    let engine = dashboard.metrics_engine_for(day);
    for site in dashboard.filter_tree(&FilterState::default()) {
        println!("=== {} ({}) ===", site.site.name, site.site.location);
        for dept in &site.departments {
            println!("  -- {} ({} machines)", dept.department.name, dept.machines.len());
            for m in &dept.machines {
                let metrics = engine.machine_metrics(m);
                let output: u32 = metrics.production.iter().map(|p| p.units).sum();
                let top_cause = metrics
                    .downtime
                    .first()
                    .map(|d| format!("{:?} {}min", d.cause, d.minutes))
                    .unwrap_or_default();
                println!(
                    "     #{:<5} {:<28} {:<15} perf {:>3}% | avail {:>3}% | qual {:>3}% | output {:>4} | {}",
                    m.id,
                    m.name,
                    m.state.label(),
                    metrics.performance,
                    metrics.availability,
                    metrics.quality,
                    output,
                    top_cause
                );
            }
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
