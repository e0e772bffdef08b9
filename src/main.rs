//! Net Worth System CLI
//!
//! Runs a projection for a holdings ledger and reports the millionaire date

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use networth_system::{
    holding::load_holdings, Assumptions, Holding, ProjectionConfig, ProjectionEngine,
};

#[derive(Parser, Debug)]
#[command(
    name = "networth",
    about = "Project net worth growth and the millionaire date"
)]
struct Args {
    /// Holdings ledger CSV (Type,Name,Units,Price,CAGR,MonthlyContrib);
    /// a built-in sample portfolio is used when omitted
    #[arg(long)]
    holdings: Option<PathBuf>,

    /// Net worth target in dollars
    #[arg(long, default_value_t = 1_000_000.0)]
    target: f64,

    /// Default annual growth rate, percent
    #[arg(long, default_value_t = 7.0)]
    default_cagr: f64,

    /// Cash APY, percent
    #[arg(long, default_value_t = 4.5)]
    cash_apy: f64,

    /// Global monthly contribution, split by starting weight
    #[arg(long, default_value_t = 0.0)]
    monthly_contrib: f64,

    /// Number of months to project
    #[arg(long, default_value_t = 780)]
    months: u32,

    /// Path for the full monthly table CSV
    #[arg(long, default_value = "projection_output.csv")]
    csv_out: PathBuf,
}

fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding::Cash {
            name: "Emergency Fund".into(),
            amount: 30_000.0,
            monthly_contribution: 200.0,
        },
        Holding::Ticker {
            name: "VTI".into(),
            units: 400.0,
            price: 265.40,
            cagr: None,
            monthly_contribution: 1_000.0,
        },
        Holding::FixedGrowth {
            name: "Duplex".into(),
            current_value: 310_000.0,
            cagr: Some(3.5),
            monthly_contribution: 0.0,
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Net Worth System v0.1.0");
    println!("=======================\n");

    let holdings = match &args.holdings {
        Some(path) => load_holdings(path).map_err(|e| anyhow!("{e}"))?,
        None => sample_holdings(),
    };

    println!("Holdings:");
    for h in &holdings {
        println!(
            "  {:<8} {:<16} ${:>12.2}  +${:.2}/mo",
            h.kind(),
            h.name(),
            h.start_value(None),
            h.monthly_contribution()
        );
    }
    println!();

    let assumptions = Assumptions {
        target: args.target,
        default_cagr: args.default_cagr,
        cash_apy: args.cash_apy,
        monthly_contrib: args.monthly_contrib,
        ..Assumptions::default()
    };

    let config = ProjectionConfig {
        projection_months: args.months,
    };

    let engine = ProjectionEngine::new(assumptions, config);
    let today = Local::now().date_naive();
    let result = engine.project(&holdings, &HashMap::new(), today);

    println!("Projection ({} months from {}):", result.table.len(), today);
    println!("{:>12} {:>16}", "Month", "Total");
    println!("{}", "-".repeat(30));
    for point in result.table.iter().take(24) {
        println!("{:>12} {:>16.2}", point.date, point.total);
    }
    if result.table.len() > 24 {
        println!("... ({} more months)", result.table.len() - 24);
    }

    println!("\nCheckpoints:");
    for cp in &result.checkpoints {
        println!("  day {:>5}: ${:>14.2}", cp.day, cp.total);
    }

    println!("\nSummary:");
    println!("  Starting Total: ${:.2}", result.start_total);
    println!("  Target:         ${:.2}", result.target);
    match (result.millionaire_date, result.days_to_target) {
        (Some(date), Some(days)) => {
            println!("  Crossing Date:  {} (~{} days)", date, days);
        }
        _ => println!("  Crossing Date:  not reached within the horizon"),
    }

    // Write the full monthly table to CSV
    let mut file = File::create(&args.csv_out)?;
    writeln!(file, "Date,Total")?;
    for point in &result.table {
        writeln!(file, "{},{:.8}", point.date, point.total)?;
    }
    println!("\nFull table written to: {}", args.csv_out.display());

    Ok(())
}
