//! rfm-runner: headless RFM segmentation runner.
//!
//! Usage:
//!   rfm-runner --input orders.csv --config data/rfm_config.json
//!   rfm-runner --input orders.csv --recency 10,30,60,120 --frequency 1,3,6 --monetary 50,150,400
//!   rfm-runner --synthetic --seed 12345 --customers 500 --days 365 --classes-out classes.csv
//!   rfm-runner --synthetic --seed 7 --suggest

use anyhow::Result;
use rfm_core::{
    export,
    loader,
    quantiles::suggest_thresholds,
    rfm_table::build_rfm_table,
    summary::{summarize_tiers, TierSummary},
    synth::{self, SyntheticConfig},
    transaction::{normalize, Transaction},
    PipelineOutput, RfmConfig,
};
use std::env;
use std::fs::File;
use std::io::BufWriter;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    config: &'a RfmConfig,
    tiers:  Vec<TierSummary>,
    #[serde(flatten)]
    output: &'a PipelineOutput,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = has_flag(&args, "--json");

    let transactions = load_transactions(&args)?;

    if has_flag(&args, "--suggest") {
        let table = build_rfm_table(&normalize(&transactions)?);
        match suggest_thresholds(&table) {
            Some(suggested) => println!("{}", serde_json::to_string_pretty(&suggested)?),
            None => println!("No customers left after normalization; nothing to suggest."),
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    let output = rfm_core::run_pipeline(&transactions, &config)?;

    if let Some(path) = arg_value(&args, "--classes-out") {
        let file = BufWriter::new(File::create(path)?);
        export::write_class_statistics(file, &output.class_statistics)?;
        log::info!("wrote class statistics to {path}");
    }
    if let Some(path) = arg_value(&args, "--segments-out") {
        let file = BufWriter::new(File::create(path)?);
        export::write_segmentation(file, &output.segmentation)?;
        log::info!("wrote customer segmentation to {path}");
    }

    if json_mode {
        let report = RunReport {
            config: &config,
            tiers:  summarize_tiers(&output.segmentation),
            output: &output,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_summary(&output, transactions.len());
    }

    Ok(())
}

fn load_transactions(args: &[String]) -> Result<Vec<Transaction>> {
    if has_flag(args, "--synthetic") {
        let seed = parse_arg(args, "--seed", 42u64);
        let defaults = SyntheticConfig::default();
        let synth_config = SyntheticConfig {
            customers: parse_arg(args, "--customers", defaults.customers),
            days:      parse_arg(args, "--days", defaults.days),
            ..defaults
        };
        log::info!(
            "generating synthetic log: seed={seed} customers={} days={}",
            synth_config.customers,
            synth_config.days,
        );
        return Ok(synth::generate(seed, &synth_config));
    }

    let path = arg_value(args, "--input")
        .ok_or_else(|| anyhow::anyhow!("either --input <csv> or --synthetic is required"))?;
    let transactions = loader::read_transactions_file(path)
        .map_err(|e| anyhow::anyhow!("Cannot load {path}: {e}"))?;
    Ok(transactions)
}

fn load_config(args: &[String]) -> Result<RfmConfig> {
    if let Some(path) = arg_value(args, "--config") {
        return RfmConfig::load(path);
    }

    let list = |flag: &str| -> Result<Vec<f64>> {
        let raw = arg_value(args, flag)
            .ok_or_else(|| anyhow::anyhow!("{flag} is required when --config is not given"))?;
        raw.split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| anyhow::anyhow!("Invalid {flag} value: {v}"))
            })
            .collect()
    };

    let config = RfmConfig::from_lists(
        &list("--recency")?,
        &list("--frequency")?,
        &list("--monetary")?,
    )?;
    Ok(config)
}

fn print_summary(output: &PipelineOutput, rows: usize) {
    println!("=== RFM SUMMARY ===");
    println!("  transactions:   {rows}");
    println!("  customers:      {}", output.segmentation.len());
    println!("  classes:        {}", output.class_statistics.len());
    match output.reference_date {
        Some(date) => println!("  reference date: {date}"),
        None => println!("  reference date: (none)"),
    }
    if let Some(top) = &output.bands.top_ranked {
        println!("  top class:      {top}");
    }
    println!(
        "  bands:          valiosos={} potenciais={} descompromissados={}",
        output.bands.valiosos.len(),
        output.bands.potenciais.len(),
        output.bands.descompromissados.len(),
    );

    println!();
    println!("=== TIERS ===");
    let tiers = summarize_tiers(&output.segmentation);
    if tiers.is_empty() {
        println!("  (No customers)");
    }
    for t in &tiers {
        println!(
            "  {:<18} | {:>6} customers ({:>5.1}%) | R: {:>6.1}d | F: {:>5.1} | M: ${:.2}",
            t.tier.label(),
            t.customers,
            t.percent_of_customers,
            t.mean_recency,
            t.mean_frequency,
            t.mean_monetary,
        );
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
