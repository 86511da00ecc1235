//! Serve a crawled API snapshot directory over HTTP.

use clap::Parser;
use snapserve::config::Config;
use snapserve::handler::ServeContext;
use snapserve::{logger, server};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Serve a crawled API snapshot directory over HTTP
#[derive(Parser, Debug)]
#[command(name = "serve", version, about)]
struct Args {
    /// Snapshot directory to serve
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
    runtime.block_on(serve(args, &config))
}

async fn serve(args: Args, config: &Config) -> Result<(), Box<dyn Error>> {
    let addr = config.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &args.snapshot_dir, config);

    let ctx = ServeContext {
        root: args.snapshot_dir,
        access_log: config.logging.access_log,
        access_log_format: config.logging.access_log_format.clone(),
    };
    server::run(listener, ctx).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["serve", "--snapshot-dir", "/tmp/snap"]).unwrap();
        assert_eq!(args.snapshot_dir, PathBuf::from("/tmp/snap"));
        assert_eq!(args.config, "snapserve");
    }

    #[test]
    fn test_snapshot_dir_is_required() {
        let result = Args::try_parse_from(["serve"]);
        assert!(result.is_err());
    }
}
