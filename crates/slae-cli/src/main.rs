#![forbid(unsafe_code)]

//! `slae`: solve a linear system read from a text file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use slae_core::{DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, Method, SolveOptions, solve_slae_recorded};
use slae_io::{Layout, parse_system, render_report};
use slae_runtime::{RuntimeMode, SolveEvidenceLedger};

#[derive(Debug, Parser)]
#[command(name = "slae")]
#[command(about = "Solve a small dense linear system A·x = b", long_about = None)]
#[command(version)]
struct Cli {
    /// System file: first line n, then n rows of `a_i1 .. a_in b_i`
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// cramer, gauss, gaussJordan, jacobi or seidel
    #[arg(short, long, default_value = "gauss")]
    method: Method,

    /// Convergence tolerance and residual bound
    #[arg(short, long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Sweep cap for jacobi and seidel
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Starting vector for iterative methods, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    initial_guess: Option<Vec<f64>>,

    /// Input layout: auto, augmented or split
    #[arg(long, default_value = "auto")]
    layout: Layout,

    /// Reject non-finite input regardless of --no-check-finite
    #[arg(long)]
    hardened: bool,

    /// Skip the NaN/inf check on A and b (ignored with --hardened)
    #[arg(long)]
    no_check_finite: bool,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Append a JSONL evidence record of the solve to this file
    #[arg(long, value_name = "PATH")]
    evidence: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
            initial_guess: self.initial_guess.clone(),
            mode: if self.hardened {
                RuntimeMode::Hardened
            } else {
                RuntimeMode::Strict
            },
            check_finite: !self.no_check_finite,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(level)
        .parse_env(env_logger::Env::default().filter_or("SLAE_LOG", level.as_str()))
        .format_timestamp(None)
        .init();
}

fn append_evidence(path: &Path, ledger: &SolveEvidenceLedger) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open evidence log {}", path.display()))?;
    let mut records = ledger.serialize_jsonl();
    records.push('\n');
    file.write_all(records.as_bytes())
        .with_context(|| format!("failed to write evidence log {}", path.display()))?;
    debug!("appended {} evidence record(s) to {}", ledger.len(), path.display());
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let system = parse_system(&text, cli.layout)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    let n = system.dimension();
    info!("loaded {n}x{n} system from {}", cli.input.display());

    let options = cli.solve_options();
    let mut ledger = SolveEvidenceLedger::new(1);
    let outcome = solve_slae_recorded(cli.method, &system.a, &system.b, &options, &mut ledger);
    if let Some(path) = &cli.evidence {
        append_evidence(path, &ledger)?;
    }
    let result = outcome.with_context(|| format!("{} solve failed", cli.method))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
        println!("{json}");
    } else {
        print!("{}", render_report(&result));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
