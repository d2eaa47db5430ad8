//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, path, formatter),
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Print the effective configuration.
fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    let origin = if path.exists() {
        format!("Loaded from {}", path.display())
    } else {
        format!("No file at {}; showing defaults", path.display())
    };
    eprintln!("{}", formatter.info(&origin));
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}
