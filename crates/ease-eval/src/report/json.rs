//! JSON report generation

use anyhow::{Context, Result};

use crate::metrics::BatchMetrics;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(metrics: &BatchMetrics) -> Result<String> {
        let json = serde_json::to_string_pretty(metrics)?;
        Ok(json)
    }

    /// Read back a report written by [`JsonReporter::generate`]
    pub fn parse(json: &str) -> Result<BatchMetrics> {
        let metrics = serde_json::from_str(json).context("Not a batch metrics report")?;
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_metrics;

    #[test]
    fn test_json_generation() {
        let metrics = sample_metrics();
        let json = JsonReporter::generate(&metrics).unwrap();

        assert!(json.contains("\"score_histogram\""));
        assert!(json.contains("\"send-email\""));
        assert!(json.contains("\"ease_score\""));
    }

    #[test]
    fn test_report_reads_back() {
        let metrics = sample_metrics();
        let json = JsonReporter::generate(&metrics).unwrap();
        let parsed = JsonReporter::parse(&json).unwrap();
        assert_eq!(parsed.case_results, metrics.case_results);
        assert_eq!(parsed.timestamp, metrics.timestamp);
    }

    #[test]
    fn test_parse_rejects_other_json() {
        let err = JsonReporter::parse(r#"{"summary": "x", "ease_score": 5, "justification": "y"}"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Not a batch metrics report"));
    }
}
