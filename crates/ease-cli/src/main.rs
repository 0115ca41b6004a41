//! Ease CLI application
//!
//! Scores UI interaction flows for ease of use and runs batches of
//! evaluation cases.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/ease-cli
//! ```
//!
//! Exit status is 0 on success, 1 when a batch has failing cases, a
//! comparison finds regressions or a checked verdict is invalid, and 2 on
//! errors.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use std::process::ExitCode;

use clap::Parser;

use args::Cli;
use console::CliConsole;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    match router::route(cli).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            let console = CliConsole::new(verbose);
            match e.downcast_ref::<ease_core::EaseError>() {
                Some(ease) => console.error(&format!("[{}] {:#}", ease.error_code(), e)),
                None => console.error(&format!("{:#}", e)),
            }
            ExitCode::from(2)
        }
    }
}
