//! Logsift CLI - Reduce repetitive build logs to one line per pattern.

use clap::Parser;
use logsift_cli::commands;
use logsift_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> logsift_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config from the given path, or the default location
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, cli.verbose, &formatter).await?;
        }
        Command::Chunks(args) => {
            commands::execute_chunks(args, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr; `--verbose` forces debug, otherwise `RUST_LOG` or info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
