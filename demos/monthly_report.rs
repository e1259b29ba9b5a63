//! End-to-end reporting run over the three source files.
//!
//! Usage:
//!
//! ```text
//! cargo run --example monthly_report -- bank.csv donations.csv [snapshot.csv]
//! ```

use std::env;
use std::fs;
use std::process;

use treasury_core::{run_report, ReconcileResult, ReportConfig, TagRules};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: monthly_report <bank.csv> <donations.csv> [snapshot.csv]");
        process::exit(2);
    }
    if let Err(err) = run(&args[1], &args[2], args.get(3).map(String::as_str)) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(bank_path: &str, donation_path: &str, snapshot_path: Option<&str>) -> ReconcileResult<()> {
    let bank = read(bank_path)?;
    let donations = read(donation_path)?;
    let snapshot = snapshot_path.map(read).transpose()?;

    let config = ReportConfig {
        tags: TagRules::new()
            .with_tag("Latino Initiative", ["latino"])
            .with_tag("Young Dems", ["young dems", "youngdems"]),
        ..ReportConfig::default()
    };

    let bundle = run_report(&bank, &donations, snapshot.as_deref(), &config)?;
    let summary = &bundle.summary;

    println!(
        "Reporting period {} through {}",
        summary.period_start, summary.period_end
    );
    println!("  Starting balance:  {:>12}", summary.starting_balance);
    println!("  Total deposits:    {:>12}", summary.total_deposits);
    println!("  Total expenses:    {:>12}", summary.total_expenses);
    println!("  Ending balance:    {:>12}", summary.ending_balance);
    for (name, balance) in &summary.sub_account_balances {
        println!("    {name}: {balance}");
    }
    println!("  Operating balance: {:>12}", summary.operating_balance);
    println!();
    println!(
        "{} deposits, {} expenses, {} donations",
        bundle.ledger.deposits.len(),
        bundle.ledger.expenses.len(),
        bundle.donations.len()
    );

    Ok(())
}

fn read(path: &str) -> ReconcileResult<String> {
    fs::read_to_string(path).map_err(|source| treasury_core::ReconcileError::SourceUnavailable {
        path: path.to_string(),
        source,
    })
}
