//! Run a net-worth projection from a plan file
//!
//! Loads instruments and goals, simulates the horizon, and writes the
//! aggregated monthly table (and optionally the per-instrument detail
//! table) as CSV for downstream charting or spreadsheet work.

use anyhow::{bail, Context, Result};
use assetflow::instrument::loader::{load_instruments_from_reader, load_plan};
use assetflow::projection::{AppreciationTiming, SimulationConfig, SimulationEngine};
use assetflow::Plan;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_plan", about = "Deterministic monthly net-worth projection")]
struct Args {
    /// Plan JSON file (instruments, goals, horizon)
    #[arg(long, conflicts_with = "instruments")]
    plan: Option<PathBuf>,

    /// Instruments CSV file (one row per instrument; no goals)
    #[arg(long)]
    instruments: Option<PathBuf>,

    /// Horizon in years; overrides the plan file's value
    #[arg(long)]
    years: Option<u32>,

    /// Simulation start date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Output CSV path for the aggregated monthly table
    #[arg(long, default_value = "net_worth_projection.csv")]
    output: PathBuf,

    /// Also write the per-instrument detail table
    #[arg(long)]
    detailed: bool,

    /// Output CSV path for the detail table
    #[arg(long, default_value = "net_worth_detail.csv")]
    detailed_output: PathBuf,

    /// Reproduce the legacy double appreciation step in zero-balance months
    #[arg(long)]
    legacy_appreciation: bool,

    /// Write a starter plan JSON to the given path and exit
    #[arg(long)]
    write_starter: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = &args.write_starter {
        let starter = Plan::starter();
        let json = serde_json::to_string_pretty(&starter)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write starter plan to {}", path.display()))?;
        println!("Starter plan written to {}", path.display());
        return Ok(());
    }

    let start = Instant::now();
    let mut plan = match (&args.plan, &args.instruments) {
        (Some(path), _) => load_plan(path)
            .with_context(|| format!("failed to load plan {}", path.display()))?,
        (None, Some(path)) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let (growth_accounts, loans) = load_instruments_from_reader(BufReader::new(file))?;
            Plan {
                years: 10,
                growth_accounts,
                loans,
                goals: Vec::new(),
            }
        }
        (None, None) => bail!("provide either --plan or --instruments"),
    };

    if let Some(years) = args.years {
        plan.years = years;
    }
    plan.validate()?;

    println!(
        "Loaded {} growth accounts, {} loans, {} goals in {:?}",
        plan.growth_accounts.len(),
        plan.loans.len(),
        plan.goals.len(),
        start.elapsed()
    );

    let start_date = args
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let mut config = SimulationConfig::new(plan.months(), start_date);
    if args.legacy_appreciation {
        config.appreciation_timing = AppreciationTiming::DoubleOnPayoff;
    }

    println!("Simulating {} months from {}...", plan.months(), start_date);
    let sim_start = Instant::now();
    let engine = SimulationEngine::new(config);
    let result = engine.simulate(&plan.growth_accounts, &plan.loans, &plan.goals);
    println!("Simulation complete in {:?}", sim_start.elapsed());

    write_aggregate_csv(&args.output, &result)?;
    println!("Output written to {}", args.output.display());

    if args.detailed {
        write_detail_csv(&args.detailed_output, &result, plan.months(), start_date)?;
        println!("Detail table written to {}", args.detailed_output.display());
    }

    // Summary stats
    if let (Some(first), Some(last)) = (result.rows.first(), result.rows.last()) {
        println!("\nProjection Summary:");
        println!(
            "  Month {:3}: Assets=${:.0}, Liabilities=${:.0}, NetWorth=${:.0}",
            first.month, first.total_assets, first.total_liabilities, first.net_worth
        );
        if let Some(mid) = result.rows.get(result.rows.len() / 2) {
            println!(
                "  Month {:3}: Assets=${:.0}, Liabilities=${:.0}, NetWorth=${:.0}",
                mid.month, mid.total_assets, mid.total_liabilities, mid.net_worth
            );
        }
        println!(
            "  Month {:3}: Assets=${:.0}, Liabilities=${:.0}, NetWorth=${:.0}",
            last.month, last.total_assets, last.total_liabilities, last.net_worth
        );
    }
    for marker in &result.goal_markers {
        println!(
            "  Goal '{}': ${:.0} at month {} ({})",
            marker.name, marker.amount, marker.month, marker.date
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

fn write_aggregate_csv(path: &PathBuf, result: &assetflow::SimulationResult) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "Month,Date,TotalAssets,TotalLiabilities,NetWorth")?;
    for row in &result.rows {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2}",
            row.month, row.date, row.total_assets, row.total_liabilities, row.net_worth
        )?;
    }
    Ok(())
}

fn write_detail_csv(
    path: &PathBuf,
    result: &assetflow::SimulationResult,
    months: u32,
    start_date: NaiveDate,
) -> Result<()> {
    use assetflow::projection::month_date;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let mut header = String::from("Month,Date");
    for series in &result.instrument_series {
        header.push(',');
        // Commas in labels would break the column layout
        header.push_str(&series.label.replace(',', " "));
    }
    writeln!(file, "{}", header)?;

    for month in 0..months {
        let mut line = format!("{},{}", month, month_date(start_date, month));
        for series in &result.instrument_series {
            line.push_str(&format!(",{:.2}", series.values[month as usize]));
        }
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
