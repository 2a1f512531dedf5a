use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pagedb::{Database, ReplConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod repl;

/// Single-table row store with a line-oriented command interpreter
#[derive(Parser, Debug)]
#[command(name = "pagedb", version, about)]
struct Args {
    /// Database file (created if it does not exist)
    #[arg(env = "PAGEDB_FILE", value_name = "FILE")]
    db_file: PathBuf,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Line-editor history file (interactive sessions only)
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    init_logging(&config, args.verbose);

    let mut db = Database::open(&args.db_file)
        .with_context(|| format!("cannot open {}", args.db_file.display()))?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl::run_interactive(&mut db, &config)?;
    } else {
        let mut stdout = io::stdout().lock();
        db.run(stdin.lock(), &mut stdout, &config.prompt)?;
    }

    db.close()?;
    info!("bye");
    Ok(())
}

fn load_config(args: &Args) -> Result<ReplConfig> {
    let mut config = match &args.config {
        Some(path) => ReplConfig::from_file(path)?,
        None => ReplConfig::default(),
    };

    if let Some(history) = &args.history {
        config.history_file = Some(history.clone());
    }

    Ok(config)
}

fn init_logging(config: &ReplConfig, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        1 => EnvFilter::new("pagedb=debug"),
        _ => EnvFilter::new("pagedb=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
