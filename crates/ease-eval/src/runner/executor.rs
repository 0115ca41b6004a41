//! Batch runner
//!
//! Turns each case into a flow, scores it, and aggregates the results.

use std::time::Instant;

use ease_core::{EaseConfig, EaseError, EaseResult, Evaluation, Evaluator, Flow, TranscriptParser};

use super::EvalConfig;
use crate::cases::{CaseInput, EvalCase};
use crate::metrics::{BatchMetrics, CaseResult, CaseStatus, MetricsAggregator};

/// Callback for progress updates during a run
pub type ProgressCallback = Box<dyn Fn(EvalProgress) + Send + Sync>;

/// Progress update during a run
#[derive(Debug, Clone)]
pub struct EvalProgress {
    /// Current case index (0-based)
    pub current: usize,
    /// Number of cases selected for the run
    pub total: usize,
    pub case_id: String,
    /// Outcome of the case just finished
    pub status: CaseStatus,
    pub score: Option<u8>,
}

/// Runs evaluation cases through an [`Evaluator`]
pub struct EvalRunner {
    config: EvalConfig,
    evaluator: Evaluator,
    parser: TranscriptParser,
    progress_callback: Option<ProgressCallback>,
}

impl EvalRunner {
    /// Create a runner from its parts
    pub fn new(config: EvalConfig, evaluator: Evaluator, parser: TranscriptParser) -> Self {
        Self {
            config,
            evaluator,
            parser,
            progress_callback: None,
        }
    }

    /// Create a runner whose weights and transcript rules come from configuration
    pub fn from_config(config: EvalConfig, ease: &EaseConfig) -> EaseResult<Self> {
        let evaluator = Evaluator::try_new(ease.scoring.clone())?;
        let parser = TranscriptParser::new(&ease.transcript)?;
        Ok(Self::new(config, evaluator, parser))
    }

    /// Set progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Run every selected case and aggregate the results
    pub fn run(&self, cases: &[EvalCase]) -> BatchMetrics {
        let start = Instant::now();
        let selected: Vec<&EvalCase> = cases.iter().filter(|c| self.config.selects(c)).collect();
        let total = selected.len();

        tracing::info!(total, "running evaluation cases");

        let mut results = Vec::with_capacity(total);
        for (current, case) in selected.into_iter().enumerate() {
            let result = self.run_case(case);
            let status = result.status;

            if let Some(callback) = &self.progress_callback {
                callback(EvalProgress {
                    current,
                    total,
                    case_id: case.id.clone(),
                    status,
                    score: result.score(),
                });
            }

            results.push(result);

            if status == CaseStatus::Error && !self.config.continue_on_error {
                tracing::warn!(case_id = %case.id, "stopping after errored case");
                break;
            }
        }

        MetricsAggregator::new().aggregate(results, start.elapsed().as_secs_f64())
    }

    /// Evaluate a single case
    pub fn run_case(&self, case: &EvalCase) -> CaseResult {
        match self.evaluate_case(case) {
            Ok(evaluation) => {
                let result = CaseResult::evaluated(case, evaluation);
                tracing::debug!(case_id = %case.id, status = %result.status, score = ?result.score(), "case evaluated");
                result
            }
            Err(e) => {
                tracing::warn!(case_id = %case.id, error = %e, "case could not be evaluated");
                CaseResult::errored(case, &e)
            }
        }
    }

    fn evaluate_case(&self, case: &EvalCase) -> EaseResult<Evaluation> {
        let flow = self.build_flow(case)?;
        self.evaluator.evaluate_detailed(&flow)
    }

    /// Build the flow a case describes. The case's task statement becomes
    /// the goal unless it is blank.
    pub fn build_flow(&self, case: &EvalCase) -> EaseResult<Flow> {
        let mut flow = match case.input()? {
            CaseInput::Steps(steps) => Flow::with_steps(case.task_statement.clone(), steps.to_vec()),
            CaseInput::Transcript(text) => self.parser.parse(text)?,
            CaseInput::TranscriptFile(_) => {
                let path = case.resolved_transcript_file().ok_or_else(|| {
                    EaseError::invalid_input_field("Missing transcript file", "transcript_file")
                })?;
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    EaseError::io_with_path(
                        format!("Failed to read transcript: {}", e),
                        path.display().to_string(),
                    )
                })?;
                self.parser.parse(&text)?
            }
        };

        if !case.task_statement.trim().is_empty() {
            flow.goal = case.task_statement.clone();
        }
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::ScoreExpectation;
    use ease_core::{Step, UiPattern};
    use std::sync::{Arc, Mutex};

    fn runner(config: EvalConfig) -> EvalRunner {
        EvalRunner::from_config(config, &EaseConfig::default()).unwrap()
    }

    fn cases() -> Vec<EvalCase> {
        vec![
            EvalCase::from_transcript(
                "email",
                "Send an email",
                "1. Click \"New Email\"\n2. Type the recipient in the To field\n3. Click Send",
            )
            .with_expected(ScoreExpectation::at_least(9))
            .with_tag("smoke"),
            EvalCase::from_steps("empty", "Nothing to do", Vec::new()),
            EvalCase::from_steps(
                "gestures",
                "Archive",
                vec![
                    Step::new("Open the list", UiPattern::Navigation),
                    Step::new("Long press the item", UiPattern::Other).ambiguous(),
                    Step::new("Swipe to archive", UiPattern::Other),
                    Step::new("Tap Undo", UiPattern::Confirmation),
                    Step::new("Close", UiPattern::Navigation),
                ],
            )
            .with_expected(ScoreExpectation::at_least(8)),
        ]
    }

    #[test]
    fn test_run_classifies_cases() {
        let metrics = runner(EvalConfig::default()).run(&cases());

        assert_eq!(metrics.total_cases, 3);
        assert_eq!(metrics.result("email").unwrap().status, CaseStatus::Passed);
        assert_eq!(metrics.result("empty").unwrap().status, CaseStatus::Error);
        let gestures = metrics.result("gestures").unwrap();
        assert_eq!(gestures.status, CaseStatus::Failed);
        assert_eq!(gestures.score(), Some(6));
    }

    #[test]
    fn test_fail_fast_stops_at_error() {
        let metrics = runner(EvalConfig::new().fail_fast()).run(&cases());
        assert_eq!(metrics.total_cases, 2);
        assert!(metrics.result("gestures").is_none());
    }

    #[test]
    fn test_filters_apply() {
        let metrics = runner(EvalConfig::new().with_tags(vec!["smoke".to_string()])).run(&cases());
        assert_eq!(metrics.total_cases, 1);
        assert_eq!(metrics.case_results[0].case_id, "email");
    }

    #[test]
    fn test_goal_comes_from_task_statement() {
        let case = EvalCase::from_transcript("t", "Buy a ticket", "To order:\n1. Click Buy");
        let flow = runner(EvalConfig::default()).build_flow(&case).unwrap();
        assert_eq!(flow.goal, "Buy a ticket");
        assert_eq!(flow.len(), 1);
    }

    #[test]
    fn test_missing_transcript_file_errors() {
        let mut case = EvalCase::from_steps("f", "Goal", Vec::new());
        case.steps = None;
        case.transcript_file = Some("no-such-file.md".into());

        let result = runner(EvalConfig::default()).run_case(&case);
        assert_eq!(result.status, CaseStatus::Error);
        assert_eq!(result.error_code.as_deref(), Some("EASE_IO"));
    }

    #[test]
    fn test_progress_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut runner = runner(EvalConfig::default());
        runner.set_progress_callback(Box::new(move |p| {
            sink.lock().unwrap().push((p.current, p.total, p.case_id));
        }));
        runner.run(&cases());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (0, 3, "email".to_string()));
        assert_eq!(seen[2].0, 2);
    }
}
