//! LEAP Finder CLI
//!
//! Interactive prompt: enter a ticker to list its LEAP calls with projected
//! payoffs, or `q` to exit. Tickers given on the command line are run once
//! each without prompting.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use leap_finder::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "leap_finder", about = "Find LEAP calls with high projected return")]
struct Args {
    /// Tickers to run once (interactive prompt if omitted)
    tickers: Vec<String>,

    /// Years of weekly history used for calibration (1, 2, 5 or 10)
    #[arg(long)]
    years: Option<u32>,

    /// Number of simulated price paths
    #[arg(long)]
    paths: Option<usize>,

    /// Simulation horizon in weeks
    #[arg(long)]
    weeks: Option<usize>,

    /// Fixed RNG seed for reproducible projections
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with finder settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

fn build_config(args: &Args) -> LeapResult<FinderConfig> {
    let mut config = match &args.config {
        Some(path) => FinderConfig::from_json_file(path)?,
        None => FinderConfig::default(),
    };

    if let Some(years) = args.years {
        config.lookback = Lookback::try_from(years)?;
    }
    if let Some(paths) = args.paths {
        config.path_count = paths;
    }
    if let Some(weeks) = args.weeks {
        config.week_count = weeks;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

fn run<S: MarketDataSource>(finder: &LeapFinder<S>, ticker: &str) {
    println!("\nGetting options information and making predictions...");

    match finder.run(ticker) {
        Ok(report) => print!("\n{}", render(&report)),
        Err(e) => {
            println!("\nSomething went wrong for {}: {}", ticker.trim().to_uppercase(), e);
            if e.is_retryable() {
                println!(
                    "There may be a problem with the Yahoo Finance API; wait and try again later."
                );
            } else {
                println!("Perhaps an invalid ticker was entered.");
            }
        }
    }
}

/// Next ticker from stdin; None on `q` or end of input
fn prompt(input: &mut impl BufRead) -> Option<String> {
    loop {
        println!("\nEnter ticker for stock to get LEAPS information for it, or enter q to exit.");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        let ticker = line.trim();
        if ticker.eq_ignore_ascii_case("q") {
            return None;
        }
        if !ticker.is_empty() {
            return Some(ticker.to_string());
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let client = match YahooClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let finder = LeapFinder::with_config(client, config);

    if !args.tickers.is_empty() {
        for ticker in &args.tickers {
            run(&finder, ticker);
        }
        return;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    while let Some(ticker) = prompt(&mut input) {
        run(&finder, &ticker);
    }

    println!("Exiting at user request.");
}
