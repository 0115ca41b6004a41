//! Configuration management commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use ease_core::config::{EaseConfig, load_config_from_file};

use super::Outcome;
use crate::console::CliConsole;

/// Show the effective configuration
pub async fn show(config_file: &Path) -> Result<Outcome> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using defaults and environment");
    }

    let config = load_config_from_file(config_file)?;
    print_config(&console, &config);
    println!();
    println!("{}", config.to_toml_string()?);
    Ok(Outcome::Clean)
}

/// Validate a configuration file
pub async fn validate(config_file: &Path) -> Result<Outcome> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");

    if !config_file.exists() {
        bail!("Configuration file not found: {}", config_file.display());
    }

    console.info(&format!(
        "Validating configuration file: {}",
        config_file.display()
    ));

    match load_config_from_file(config_file) {
        Ok(config) => {
            console.success("Configuration is valid");
            console.print_separator();
            print_config(&console, &config);
            Ok(Outcome::Clean)
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {}", e));
            Ok(Outcome::Findings)
        }
    }
}

/// Write a configuration file holding the defaults
pub async fn init(config_file: &Path, force: bool) -> Result<Outcome> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.info("Use --force to overwrite");
        bail!(
            "Configuration file already exists: {}",
            config_file.display()
        );
    }

    let toml = EaseConfig::default().to_toml_string()?;
    tokio::fs::write(config_file, toml)
        .await
        .with_context(|| format!("Failed to write configuration file: {}", config_file.display()))?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    Ok(Outcome::Clean)
}

fn print_config(console: &CliConsole, config: &EaseConfig) {
    let weights = &config.scoring;
    console.info(&format!("Base Score: {}", weights.base_score.to_string().green()));
    console.info(&format!(
        "Count Penalty: {} per step beyond {}, capped at {}",
        weights.step_penalty, weights.free_steps, weights.max_count_penalty
    ));
    console.info(&format!(
        "Ambiguous Step Penalty: {}",
        weights.ambiguous_penalty.to_string().yellow()
    ));
    console.info(&format!(
        "Non-standard Step Penalty: {}",
        weights.other_pattern_penalty.to_string().yellow()
    ));
    console.info(&format!(
        "Transcript Rules: {} ({} ambiguity cues)",
        config.transcript.rules.len(),
        config.transcript.ambiguity_cues.len()
    ));
    console.info(&format!(
        "Logging: {} ({})",
        config.logging.level, config.logging.format
    ));
    console.info(&format!(
        "Report: {} (regression threshold {})",
        config.report.format, config.report.regression_threshold
    ));
}
