//! Crawl a show-tracker API into a fresh snapshot directory.

use clap::Parser;
use snapserve::config::Config;
use snapserve::{crawler, logger};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Crawl a show-tracker API into a fresh snapshot directory
#[derive(Parser, Debug)]
#[command(name = "snapshot", version, about)]
struct Args {
    /// Base URL of the API server, e.g. http://localhost:8080
    #[arg(long)]
    server_url: String,

    /// Directory to create for the snapshot (must not exist yet)
    #[arg(long)]
    snapshot_dir: PathBuf,

    /// Configuration file path (without extension)
    #[arg(long, default_value = "snapserve")]
    config: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load_from(&args.config)?;
    logger::init(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let assets_dir = PathBuf::from(&config.crawl.assets_dir);
    runtime.block_on(crawler::run_crawl(
        &args.server_url,
        &args.snapshot_dir,
        &assets_dir,
    ))?;
    Ok(())
}
