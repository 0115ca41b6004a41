//! Batch commands: run evaluation cases and compare reports

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use colored::*;
use ease_core::EaseConfig;
use ease_eval::{
    BatchMetrics, CaseLoader, EvalConfig, EvalProgress, EvalRunner, JsonReporter,
    RegressionConfig, RegressionDetector, ReportFormat, generate_report,
};

use super::{Outcome, read_input};
use crate::console::CliConsole;

/// Options for `ease batch`
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub ids: Vec<String>,
    pub tags: Vec<String>,
    pub fail_fast: bool,
}

fn report_format(requested: Option<&str>, config: &EaseConfig) -> Result<ReportFormat> {
    let name = requested.unwrap_or(&config.report.format);
    ReportFormat::parse(name).ok_or_else(|| anyhow!("Unknown report format: {}", name))
}

/// Load and run the cases, off the async runtime
pub async fn run_cases(
    config: &EaseConfig,
    path: &Path,
    options: &BatchOptions,
    verbose: bool,
) -> Result<BatchMetrics> {
    let mut eval_config = EvalConfig::new()
        .with_case_ids(options.ids.clone())
        .with_tags(options.tags.clone());
    if options.fail_fast {
        eval_config = eval_config.fail_fast();
    }

    let mut runner = EvalRunner::from_config(eval_config, config)?;
    if verbose {
        runner.set_progress_callback(Box::new(|progress: EvalProgress| {
            eprintln!(
                "[{}/{}] {} - {}{}",
                progress.current + 1,
                progress.total,
                progress.case_id,
                progress.status,
                progress
                    .score
                    .map(|s| format!(" (score {})", s))
                    .unwrap_or_default()
            );
        }));
    }

    let loader = CaseLoader::new(path);
    tokio::task::spawn_blocking(move || -> Result<BatchMetrics> {
        let cases = loader.load_all()?;
        if cases.is_empty() {
            return Err(anyhow!("No cases found in {}", loader.path().display()));
        }
        if !cases.iter().any(|case| runner.config().selects(case)) {
            return Err(anyhow!(
                "No cases in {} match the --ids/--tags filters",
                loader.path().display()
            ));
        }
        Ok(runner.run(&cases))
    })
    .await
    .context("Batch run panicked")?
}

/// `ease batch`
pub async fn batch(
    config: &EaseConfig,
    path: &Path,
    options: BatchOptions,
    verbose: bool,
) -> Result<Outcome> {
    let console = CliConsole::new(verbose);
    let format = report_format(options.format.as_deref(), config)?;

    console.info(&format!("Running cases from {}", path.display()));
    let metrics = run_cases(config, path, &options, verbose).await?;
    let report = generate_report(&metrics, format)?;

    match &options.output {
        Some(output) => {
            tokio::fs::write(output, &report)
                .await
                .with_context(|| format!("Failed to write report: {}", output.display()))?;
            console.success(&format!("Report written to {}", output.display()));
        }
        None => println!("{}", report),
    }

    let summary = format!(
        "{}/{} cases passed ({}), {} failed, {} errors",
        metrics.passed,
        metrics.total_cases,
        metrics.pass_rate_percentage(),
        metrics.failed,
        metrics.errors
    );

    if metrics.all_passed() {
        console.success(&summary);
        Ok(Outcome::Clean)
    } else {
        console.warn(&summary);
        Ok(Outcome::Findings)
    }
}

async fn load_report(path: &Path) -> Result<BatchMetrics> {
    let content = read_input(path).await?;
    JsonReporter::parse(&content).with_context(|| format!("Failed to parse report: {}", path.display()))
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map_or_else(|| "-".to_string(), |m| format!("{:.2}", m))
}

/// `ease compare`
pub async fn compare(
    config: &EaseConfig,
    baseline: &Path,
    current: &Path,
    threshold: Option<u8>,
) -> Result<Outcome> {
    let baseline_metrics = load_report(baseline).await?;
    let current_metrics = load_report(current).await?;

    let threshold = threshold.unwrap_or(config.report.regression_threshold);
    let detector = RegressionDetector::new(RegressionConfig::default().with_case_threshold(threshold));
    let regressions = detector.detect(&baseline_metrics, &current_metrics);

    println!("Comparison: {} vs {}\n", baseline.display(), current.display());
    println!(
        "{:<20} {:>15} {:>15} {:>15}",
        "Metric", "Baseline", "Current", "Change"
    );
    println!("{:-<65}", "");

    let baseline_rate = baseline_metrics.pass_rate * 100.0;
    let current_rate = current_metrics.pass_rate * 100.0;
    println!(
        "{:<20} {:>14.1}% {:>14.1}% {:>+14.1}%",
        "Pass Rate",
        baseline_rate,
        current_rate,
        current_rate - baseline_rate
    );

    let mean_change = match (baseline_metrics.mean_score, current_metrics.mean_score) {
        (Some(before), Some(after)) => format!("{:+.2}", after - before),
        _ => "-".to_string(),
    };
    println!(
        "{:<20} {:>15} {:>15} {:>15}",
        "Mean Score",
        format_mean(baseline_metrics.mean_score),
        format_mean(current_metrics.mean_score),
        mean_change
    );

    println!(
        "{:<20} {:>15} {:>15} {:>+15}",
        "Cases",
        baseline_metrics.total_cases,
        current_metrics.total_cases,
        current_metrics.total_cases as i64 - baseline_metrics.total_cases as i64
    );
    println!();

    if regressions.is_empty() {
        println!("{}", "No regressions detected.".green());
        Ok(Outcome::Clean)
    } else {
        println!("{}", RegressionDetector::summarize(&regressions).red());
        Ok(Outcome::Findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CASES: &str = r#"
- id: quick
  task_statement: Open settings
  transcript: "1. Tap the gear icon\n2. Tap Display"
  expected: { min_score: 9 }
  tags: [smoke]
- id: buried
  task_statement: Find the export option
  transcript: |
    1. Open the hamburger menu
    2. Tap More
    3. Tap the three dots icon
    4. Scroll to Advanced
    5. Select Export
  expected: { min_score: 6 }
"#;

    fn write_cases(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("cases.yaml");
        fs::write(&path, CASES).unwrap();
        path
    }

    #[test]
    fn test_report_format_resolution() {
        let config = EaseConfig::default();
        assert_eq!(report_format(None, &config).unwrap(), ReportFormat::Table);
        assert_eq!(report_format(Some("md"), &config).unwrap(), ReportFormat::Markdown);
        assert!(report_format(Some("xml"), &config).is_err());
    }

    #[tokio::test]
    async fn test_run_cases_and_outcome() {
        let dir = TempDir::new().unwrap();
        let path = write_cases(&dir);
        let config = EaseConfig::default();

        let metrics = run_cases(&config, &path, &BatchOptions::default(), false)
            .await
            .unwrap();
        assert_eq!(metrics.total_cases, 2);
        assert_eq!(metrics.passed, 1);
        assert_eq!(metrics.result("buried").unwrap().score(), Some(5));

        let options = BatchOptions {
            format: Some("json".to_string()),
            output: Some(dir.path().join("report.json")),
            ..Default::default()
        };
        let outcome = batch(&config, &path, options, false).await.unwrap();
        assert_eq!(outcome, Outcome::Findings);

        let written = fs::read_to_string(dir.path().join("report.json")).unwrap();
        assert!(JsonReporter::parse(&written).is_ok());
    }

    #[tokio::test]
    async fn test_tag_filter_only_runs_passing_case() {
        let dir = TempDir::new().unwrap();
        let path = write_cases(&dir);
        let options = BatchOptions {
            tags: vec!["smoke".to_string()],
            output: Some(dir.path().join("out.txt")),
            ..Default::default()
        };

        let outcome = batch(&EaseConfig::default(), &path, options, false)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[tokio::test]
    async fn test_filters_matching_nothing_are_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_cases(&dir);

        let by_id = BatchOptions {
            ids: vec!["nope".to_string()],
            ..Default::default()
        };
        let err = run_cases(&EaseConfig::default(), &path, &by_id, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("match the --ids/--tags filters"));

        let by_tag = BatchOptions {
            tags: vec!["nightly".to_string()],
            ..Default::default()
        };
        assert!(batch(&EaseConfig::default(), &path, by_tag, false).await.is_err());
    }

    #[tokio::test]
    async fn test_compare_reports() {
        let dir = TempDir::new().unwrap();
        let path = write_cases(&dir);

        let config = EaseConfig::default();
        let baseline = run_cases(&config, &path, &BatchOptions::default(), false)
            .await
            .unwrap();
        let baseline_path = dir.path().join("baseline.json");
        fs::write(&baseline_path, JsonReporter::generate(&baseline).unwrap()).unwrap();

        assert_eq!(
            compare(&config, &baseline_path, &baseline_path, None)
                .await
                .unwrap(),
            Outcome::Clean
        );

        let mut harsh = EaseConfig::default();
        harsh.scoring = harsh.scoring.with_count_penalty(3.0, 10.0);
        let current = run_cases(&harsh, &path, &BatchOptions::default(), false)
            .await
            .unwrap();
        let current_path = dir.path().join("current.json");
        fs::write(&current_path, JsonReporter::generate(&current).unwrap()).unwrap();

        assert_eq!(
            compare(&config, &baseline_path, &current_path, Some(1))
                .await
                .unwrap(),
            Outcome::Findings
        );
    }

    #[tokio::test]
    async fn test_compare_rejects_non_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("verdict.json");
        fs::write(&path, r#"{"summary": "s", "ease_score": 5, "justification": "j"}"#).unwrap();

        assert!(compare(&EaseConfig::default(), &path, &path, None).await.is_err());
    }
}
