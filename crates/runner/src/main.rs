use std::sync::Arc;

use cadence_runner::{
    BookScorer, DEFAULT_ALERT_HORIZON_DAYS, RunnerError, RunnerResult, SyntheticClientGenerator,
    SyntheticConfig, demo_profiles, populate,
};
use cadence_switch::{SwitchProbabilityEngine, load_config, load_default_config};
use chrono::Utc;

fn print_help() {
    eprintln!(
        r#"Cadence Runner - score a synthetic client book for strategy-switch risk

USAGE:
    cadence-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load engine configuration from JSON file
    --clients <N>       Number of synthetic clients (default: 12)
    --seed <N>          RNG seed for the synthetic book (default: 42)
    --switch-days <N>   Days before as-of at which switching clients change segment (default: 6)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)
"#
    );
}

struct Args {
    config_path: Option<String>,
    clients: usize,
    seed: u64,
    switch_days: u32,
}

fn parse_args() -> RunnerResult<Option<Args>> {
    let mut args = Args {
        config_path: None,
        clients: 12,
        seed: 42,
        switch_days: 6,
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| RunnerError::InvalidArgument(format!("{arg} requires a value")))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--config" | "-c" => args.config_path = Some(value()?),
            "--clients" => args.clients = parse_number(arg, &value()?)?,
            "--seed" => args.seed = parse_number(arg, &value()?)?,
            "--switch-days" => args.switch_days = parse_number(arg, &value()?)?,
            other => {
                return Err(RunnerError::InvalidArgument(format!(
                    "unknown argument: {other}"
                )));
            }
        }
    }

    Ok(Some(args))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> RunnerResult<T> {
    value
        .parse()
        .map_err(|_| RunnerError::InvalidArgument(format!("{flag}: not a number: {value}")))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_help();
            std::process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => {
            log::info!("Loading configuration from: {path}");
            load_config(path)?
        }
        None => load_default_config()?,
    };
    let engine = Arc::new(SwitchProbabilityEngine::new(config)?);

    let as_of = Utc::now();
    let profiles = demo_profiles(args.clients, args.switch_days);
    let mut generator = SyntheticClientGenerator::with_seed(SyntheticConfig::default(), args.seed);
    let source = populate(&mut generator, &profiles, as_of);

    let scorer = BookScorer::new(engine, Arc::new(source));
    let clients: Vec<String> = profiles.iter().map(|p| p.client_id.clone()).collect();
    let report = scorer
        .run(&clients, as_of, DEFAULT_ALERT_HORIZON_DAYS)
        .await?;

    log::info!(
        "High risk clients: {}",
        report
            .high_risk()
            .map(|s| s.client_id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
