//! Run the sample cases shipped with ease-eval and print a table report.
//!
//! Run with: cargo run --example batch_demo

use ease::EaseConfig;
use ease::eval::{CaseLoader, EvalConfig, EvalRunner, ReportFormat, generate_report};

fn main() -> anyhow::Result<()> {
    let cases = CaseLoader::builtin().load_all()?;
    let runner = EvalRunner::from_config(EvalConfig::default(), &EaseConfig::default())?;
    let metrics = runner.run(&cases);

    println!("{}", generate_report(&metrics, ReportFormat::Table)?);
    println!("{}", serde_json::to_string_pretty(&metrics.score_histogram)?);
    Ok(())
}
