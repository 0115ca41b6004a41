//! Report generation for batch results
//!
//! Generates reports as JSON, Markdown or a plain terminal table.

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use anyhow::Result;

use crate::metrics::BatchMetrics;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    Table,
}

impl ReportFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "table" => Some(ReportFormat::Table),
            _ => None,
        }
    }

    /// File extension for reports in this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Table => "txt",
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(metrics: &BatchMetrics, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(metrics),
        ReportFormat::Markdown => MarkdownReporter::generate(metrics),
        ReportFormat::Table => Ok(generate_table(metrics)),
    }
}

fn score_cell(score: Option<u8>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

/// Generate a simple table report for terminal output
fn generate_table(metrics: &BatchMetrics) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<70}\n", "= Ease Evaluation Results "));
    output.push_str(&format!(
        "Ease: {} | Timestamp: {}\n",
        metrics.ease_version,
        metrics.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<70}\n\n", ""));

    output.push_str("SUMMARY\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "Passed: {}/{} ({}) | Failed: {} | Errors: {}\n",
        metrics.passed,
        metrics.total_cases,
        metrics.pass_rate_percentage(),
        metrics.failed,
        metrics.errors
    ));
    match metrics.mean_score {
        Some(mean) => output.push_str(&format!(
            "Mean Score: {:.2} (min {}, max {})\n",
            mean,
            score_cell(metrics.min_score),
            score_cell(metrics.max_score)
        )),
        None => output.push_str("Mean Score: -\n"),
    }
    output.push_str(&format!("Mean Steps: {:.1}\n", metrics.mean_step_count));
    output.push_str(&format!(
        "Ambiguous Steps: {} | Non-standard Steps: {}\n",
        metrics.total_ambiguous_steps, metrics.total_non_standard_steps
    ));
    output.push_str(&format!(
        "Total Time: {:.3}s\n\n",
        metrics.total_execution_time_secs
    ));

    output.push_str("SCORE DISTRIBUTION\n");
    output.push_str(&format!("{:-<70}\n", ""));
    for (index, count) in metrics.score_histogram.iter().enumerate().rev() {
        output.push_str(&format!("{:>3} | {:<40} {}\n", index + 1, "#".repeat(*count), count));
    }
    output.push('\n');

    output.push_str("CASE RESULTS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<30} {:>8} {:>7} {:>8} {:>12}\n",
        "Case", "Status", "Score", "Steps", "Expected"
    ));
    output.push_str(&format!("{:-<70}\n", ""));

    for result in &metrics.case_results {
        let case_id = if result.case_id.chars().count() > 28 {
            format!("{}...", result.case_id.chars().take(25).collect::<String>())
        } else {
            result.case_id.clone()
        };
        let expected = result
            .expected
            .map_or_else(|| "-".to_string(), |e| e.to_string());

        output.push_str(&format!(
            "{:<30} {:>8} {:>7} {:>8} {:>12}\n",
            case_id,
            result.status.label(),
            score_cell(result.score()),
            result.step_count,
            expected
        ));
    }

    let errored: Vec<_> = metrics
        .case_results
        .iter()
        .filter_map(|r| r.error.as_ref().map(|e| (&r.case_id, e)))
        .collect();
    if !errored.is_empty() {
        output.push_str(&format!("{:-<70}\n", ""));
        output.push_str("ERRORS\n");
        for (case_id, error) in errored {
            output.push_str(&format!("  {}: {}\n", case_id, error));
        }
    }

    output.push_str(&format!("{:=<70}\n", ""));

    output
}
