//! Command routing logic for CLI

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use ease_core::config::{DEFAULT_CONFIG_FILE, EaseConfig, LoggingConfig, load_config_from_file};

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands::{self, Outcome, batch::BatchOptions};
use crate::logging;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<Outcome> {
    let explicit = cli.config_file.is_some();
    let config_file = cli
        .config_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    // Config commands report on the file themselves, so they must not fail
    // while loading it
    if let Commands::Config { action } = &cli.command {
        logging::init(&LoggingConfig::default(), cli.verbose)?;
        return route_config(action, &config_file).await;
    }

    let config = load_settings(&config_file, explicit)?;
    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!(config_file = %config_file.display(), "configuration loaded");

    route_command(cli.command, &config, &config_file, cli.verbose).await
}

async fn route_command(
    command: Commands,
    config: &EaseConfig,
    config_file: &Path,
    verbose: bool,
) -> Result<Outcome> {
    match command {
        Commands::Evaluate {
            flow,
            transcript,
            pretty,
            explain,
        } => commands::evaluate::evaluate(config, &flow, transcript, pretty, explain).await,
        Commands::Parse { transcript, pretty } => {
            commands::evaluate::parse(config, &transcript, pretty).await
        }
        Commands::Check { file } => commands::evaluate::check(&file, verbose).await,
        Commands::Batch {
            path,
            format,
            output,
            ids,
            tags,
            fail_fast,
        } => {
            let options = BatchOptions {
                format,
                output,
                ids,
                tags,
                fail_fast,
            };
            commands::batch::batch(config, &path, options, verbose).await
        }
        Commands::Compare {
            baseline,
            current,
            threshold,
        } => commands::batch::compare(config, &baseline, &current, threshold).await,
        Commands::Config { action } => route_config(&action, config_file).await,
    }
}

/// Load configuration; a file named on the command line must exist
fn load_settings(config_file: &Path, explicit: bool) -> Result<EaseConfig> {
    if explicit && !config_file.exists() {
        bail!("Configuration file not found: {}", config_file.display());
    }
    Ok(load_config_from_file(config_file)?)
}

async fn route_config(action: &ConfigAction, config_file: &Path) -> Result<Outcome> {
    match action {
        ConfigAction::Show => commands::config::show(config_file).await,
        ConfigAction::Init { force } => commands::config::init(config_file, *force).await,
        ConfigAction::Validate => commands::config::validate(config_file).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_is_error() {
        let err = load_settings(Path::new("/no/such/ease.toml"), true).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_implicit_missing_config_uses_defaults() {
        let config = load_settings(Path::new("/no/such/ease.toml"), false).unwrap();
        assert_eq!(config.scoring, EaseConfig::default().scoring);
    }
}
