use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use twinprime::prompt::read_integer;
use twinprime::scan::{Aggregation, ScanConfig, run_scan};
use twinprime::TrialDivision;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "twinprime")]
#[command(about = "twinprime - parallel twin prime counter")]
#[command(version)]
struct Args {
    /// Exclusive upper bound of the search (prompted for when omitted)
    #[arg(long, env = "TWINPRIME_RANGE", allow_negative_numbers = true)]
    range: Option<i64>,
    /// Number of worker threads (prompted for when omitted)
    #[arg(long, short = 'j', env = "TWINPRIME_THREADS", allow_negative_numbers = true)]
    threads: Option<i64>,
    /// How worker results are merged
    #[arg(long, value_enum, default_value = "reduce")]
    aggregation: CliAggregation,
    /// Divisor bound for the primality test
    #[arg(long, value_enum, default_value = "square-root")]
    trial: CliTrialDivision,
    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Print per-worker statistics after the scan
    #[arg(long, short)]
    verbose: bool,
}

/// CLI aggregation strategy selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAggregation {
    /// One shared tally behind a mutex
    Locked,
    /// Private per-worker tallies merged after the join
    Reduce,
}

impl From<CliAggregation> for Aggregation {
    fn from(cli: CliAggregation) -> Self {
        match cli {
            CliAggregation::Locked => Aggregation::Locked,
            CliAggregation::Reduce => Aggregation::Reduce,
        }
    }
}

/// CLI trial division bound selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliTrialDivision {
    /// Every divisor below n
    Exhaustive,
    /// Divisors up to the square root of n
    SquareRoot,
}

impl From<CliTrialDivision> for TrialDivision {
    fn from(cli: CliTrialDivision) -> Self {
        match cli {
            CliTrialDivision::Exhaustive => TrialDivision::Exhaustive,
            CliTrialDivision::SquareRoot => TrialDivision::SquareRoot,
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Welcome to the twin prime counter!")?;

    let range = match args.range {
        Some(range) => range,
        None => read_integer(&mut input, &mut out, "Enter search range: ", "search range")?,
    };
    let threads = match args.threads {
        Some(threads) => threads,
        None => read_integer(
            &mut input,
            &mut out,
            "Enter number of threads: ",
            "number of threads",
        )?,
    };

    let config = ScanConfig::new(range, threads)
        .with_aggregation(args.aggregation.into())
        .with_trial_division(args.trial.into())
        .with_timeout_option(args.timeout.map(Duration::from_secs));

    let start = Instant::now();
    let report = run_scan(&config)
        .with_context(|| format!("scan of [2, {}) with {} threads failed", range, threads))?;
    let elapsed = start.elapsed();

    writeln!(out, "\nTwin Primes; ")?;
    write!(out, "{}", report.result.format_twins())?;
    writeln!(out, "\nTime Taken: {}ms", elapsed.as_millis())?;
    writeln!(out, "Total Number of Primes : {}", report.result.prime_count)?;

    if args.verbose {
        writeln!(out, "\nScan Statistics:")?;
        write!(out, "{}", report.statistics.format_summary())?;
    }

    Ok(())
}

// --- Main Function ---
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
