use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use console::style;

use pxesync::{PlatformSync, SyncConfig, SyncOutcome};

#[derive(Parser, Debug)]
#[command(name = "pxesync")]
#[command(about = "Fetch the newest published platform image and install it")]
struct Args {
    /// Download server base URL
    #[arg(long)]
    server: String,

    /// Directory holding installed platform images
    #[arg(long)]
    datadir: PathBuf,

    /// Server-relative path of the latest-version pointer
    #[arg(long, default_value = "/latest")]
    latest_path: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(outcome) => {
            report(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<SyncOutcome> {
    let config = SyncConfig::new(args.server, args.datadir)
        .with_latest_path(args.latest_path)
        .with_timeout(Duration::from_secs(args.timeout));

    let sync = PlatformSync::new(config)?;
    Ok(sync.sync()?)
}

fn init_logging(verbose: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_level(verbose)),
    )
    .init();
}

fn filter_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn report(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::AlreadyInstalled { version } => {
            println!(
                "{} platform {} is up to date",
                style("pxesync").green().bold(),
                version
            );
        }
        SyncOutcome::Installed { version } => {
            println!(
                "{} installed platform {}",
                style("pxesync").green().bold(),
                version
            );
        }
    }
}
