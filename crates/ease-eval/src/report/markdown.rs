//! Markdown report generation

use anyhow::Result;

use crate::metrics::{BatchMetrics, CaseStatus};

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(metrics: &BatchMetrics) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Ease Evaluation Report\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Ease Version**: {}\n", metrics.ease_version));
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            metrics.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Total Execution Time**: {:.3}s\n\n",
            metrics.total_execution_time_secs
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!(
            "| Passed | {}/{} ({}) |\n",
            metrics.passed,
            metrics.total_cases,
            metrics.pass_rate_percentage()
        ));
        md.push_str(&format!("| Failed | {} |\n", metrics.failed));
        md.push_str(&format!("| Errors | {} |\n", metrics.errors));
        if let Some(mean) = metrics.mean_score {
            md.push_str(&format!("| Mean Score | {:.2} |\n", mean));
        }
        if let (Some(min), Some(max)) = (metrics.min_score, metrics.max_score) {
            md.push_str(&format!("| Score Range | {}-{} |\n", min, max));
        }
        md.push_str(&format!("| Mean Steps | {:.1} |\n", metrics.mean_step_count));
        md.push_str(&format!(
            "| Ambiguous Steps | {} |\n",
            metrics.total_ambiguous_steps
        ));
        md.push_str(&format!(
            "| Non-standard Steps | {} |\n\n",
            metrics.total_non_standard_steps
        ));

        md.push_str("## Score Distribution\n\n");
        md.push_str("| Score | Cases |\n|-------|-------|\n");
        for (index, count) in metrics.score_histogram.iter().enumerate() {
            if *count > 0 {
                md.push_str(&format!("| {} | {} |\n", index + 1, count));
            }
        }
        md.push('\n');

        md.push_str("## Case Results\n\n");
        md.push_str("| Case | Task | Status | Score | Steps | Expected |\n");
        md.push_str("|------|------|--------|-------|-------|----------|\n");

        for result in &metrics.case_results {
            let status_emoji = match result.status {
                CaseStatus::Passed => "✅",
                CaseStatus::Failed => "❌",
                CaseStatus::Error => "💥",
            };

            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                result.case_id,
                escape_cell(&result.task_statement),
                status_emoji,
                result.score().map_or_else(|| "-".to_string(), |s| s.to_string()),
                result.step_count,
                result.expected.map_or_else(|| "-".to_string(), |e| e.to_string()),
            ));
        }
        md.push('\n');

        let unsuccessful: Vec<_> = metrics.unsuccessful().collect();
        if !unsuccessful.is_empty() {
            md.push_str("## Details\n\n");
            for result in unsuccessful {
                md.push_str(&format!("### {}\n\n", result.case_id));
                md.push_str(&format!("- **Status**: {}\n", result.status));
                if let Some(error) = &result.error {
                    md.push_str(&format!("- **Error**: {}\n", error));
                }
                if let Some(verdict) = &result.verdict {
                    md.push_str(&format!("- **Summary**: {}\n", verdict.summary));
                    md.push_str(&format!("- **Justification**: {}\n", verdict.justification));
                }
                md.push('\n');
            }
        }

        Ok(md)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
