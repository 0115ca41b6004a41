//! Ease-of-use evaluator
//!
//! Pure, synchronous scoring of a [`Flow`] into a [`Verdict`]. The evaluator
//! keeps no state between calls, so one instance can be shared freely
//! across threads.

use crate::error::{EaseError, EaseResult};
use crate::flow::Flow;
use crate::scoring::{MAX_SCORE, MIN_SCORE, PenaltyBreakdown, ScoringWeights};
use crate::verdict::{Evaluation, Verdict};

/// Rule-based evaluator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluator {
    weights: ScoringWeights,
}

impl Evaluator {
    /// Create an evaluator with the given weights, without checking them
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create an evaluator after validating the weights
    pub fn try_new(weights: ScoringWeights) -> EaseResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Weights in use
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a flow
    pub fn evaluate(&self, flow: &Flow) -> EaseResult<Verdict> {
        self.evaluate_detailed(flow).map(Evaluation::into_verdict)
    }

    /// Score a flow and keep the penalty breakdown
    pub fn evaluate_detailed(&self, flow: &Flow) -> EaseResult<Evaluation> {
        flow.validate()?;

        let breakdown = PenaltyBreakdown::compute(flow, &self.weights);
        let score = breakdown.rounded_score;
        if !score.is_finite() || score < f64::from(MIN_SCORE) || score > f64::from(MAX_SCORE) {
            return Err(EaseError::validation_field(
                format!(
                    "Computed score {} escaped [{}, {}] after clamping",
                    score, MIN_SCORE, MAX_SCORE
                ),
                "ease_score",
            ));
        }

        let verdict = Verdict::new(
            summarize(flow),
            score as u8,
            justify(flow, &breakdown),
        )?;

        tracing::debug!(
            goal = %flow.goal,
            steps = breakdown.step_count,
            ambiguous = breakdown.ambiguous_steps.len(),
            non_standard = breakdown.non_standard_steps.len(),
            score = verdict.ease_score,
            "evaluated flow"
        );

        Ok(Evaluation { verdict, breakdown })
    }
}

/// Score a flow with the default weights
pub fn evaluate(flow: &Flow) -> EaseResult<Verdict> {
    Evaluator::default().evaluate(flow)
}

fn summarize(flow: &Flow) -> String {
    flow.steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("Step {}: {}", i + 1, step.description.trim()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn justify(flow: &Flow, b: &PenaltyBreakdown) -> String {
    let mut parts = Vec::with_capacity(4);

    let extra = b.step_count.saturating_sub(b.free_steps);
    parts.push(if extra == 0 {
        format!("{} (no count penalty).", plural(b.step_count, "step"))
    } else {
        format!(
            "{}: {} beyond the first {}, count penalty {}{}.",
            plural(b.step_count, "step"),
            extra,
            b.free_steps,
            if b.count_capped { "capped at " } else { "" },
            points(b.count_penalty)
        )
    });

    parts.push(listed(
        flow,
        plural(b.ambiguous_steps.len(), "ambiguous step"),
        &b.ambiguous_steps,
        b.ambiguity_penalty,
    ));
    parts.push(listed(
        flow,
        plural(b.non_standard_steps.len(), "non-standard step"),
        &b.non_standard_steps,
        b.pattern_penalty,
    ));

    let mut arithmetic = format!(
        "Score: {} - {} - {} - {} = {}",
        points(b.base_score),
        points(b.count_penalty),
        points(b.pattern_penalty),
        points(b.ambiguity_penalty),
        points(b.raw_score)
    );
    if b.was_clamped() {
        arithmetic.push_str(&format!(", clamped to {}", points(b.clamped_score)));
    }
    arithmetic.push_str(&format!(", rounded to {}.", b.rounded_score));
    parts.push(arithmetic);

    parts.join(" ")
}

fn listed(flow: &Flow, label: String, positions: &[usize], penalty: f64) -> String {
    if positions.is_empty() {
        return format!("{}.", label);
    }
    let which = positions
        .iter()
        .map(|&pos| format!("step {} \"{}\"", pos, flow.steps[pos - 1].description.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} ({}), penalty {}.", label, which, points(penalty))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn points(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Step, UiPattern};

    fn clean_flow(n: usize) -> Flow {
        let steps = (1..=n)
            .map(|i| Step::new(format!("action {}", i), UiPattern::Navigation))
            .collect();
        Flow::with_steps("goal", steps)
    }

    #[test]
    fn test_three_clean_steps_score_ten() {
        let verdict = evaluate(&clean_flow(3)).unwrap();
        assert_eq!(verdict.ease_score, 10);
    }

    #[test]
    fn test_single_step_has_no_count_penalty() {
        let evaluation = Evaluator::default()
            .evaluate_detailed(&clean_flow(1))
            .unwrap();
        assert_eq!(evaluation.breakdown.count_penalty, 0.0);
        assert_eq!(evaluation.verdict.ease_score, 10);
        assert!(evaluation.verdict.justification.starts_with("1 step (no count penalty)."));
    }

    #[test]
    fn test_two_step_scenario() {
        let flow = Flow::new("save settings")
            .step(Step::new("navigate to settings", UiPattern::Navigation))
            .step(Step::new("tap save", UiPattern::Confirmation));
        let verdict = evaluate(&flow).unwrap();

        assert_eq!(verdict.ease_score, 10);
        assert_eq!(verdict.summary, "Step 1: navigate to settings; Step 2: tap save");
        assert!(verdict.justification.contains("2 steps (no count penalty)"));
        assert!(verdict.justification.contains("0 ambiguous steps"));
        assert!(verdict.justification.contains("0 non-standard steps"));
    }

    #[test]
    fn test_five_step_scenario() {
        let flow = Flow::new("send an email")
            .step(Step::new("click New Email", UiPattern::Navigation))
            .step(Step::new("enter recipient", UiPattern::FormInput))
            .step(Step::new("find the hidden cc toggle", UiPattern::Selection).ambiguous())
            .step(Step::new("shake the device to attach", UiPattern::Other))
            .step(Step::new("click Send", UiPattern::Confirmation));
        let evaluation = Evaluator::default().evaluate_detailed(&flow).unwrap();

        assert_eq!(evaluation.breakdown.count_penalty, 2.0);
        assert_eq!(evaluation.breakdown.total_penalty(), 4.0);
        assert_eq!(evaluation.verdict.ease_score, 6);

        let justification = &evaluation.verdict.justification;
        assert!(justification.contains("5 steps: 2 beyond the first 3, count penalty 2.0."));
        assert!(justification.contains("1 ambiguous step (step 3 \"find the hidden cc toggle\"), penalty 1.5."));
        assert!(justification.contains("1 non-standard step (step 4 \"shake the device to attach\"), penalty 0.5."));
        assert!(justification.ends_with("Score: 10.0 - 2.0 - 0.5 - 1.5 = 6.0, rounded to 6."));
    }

    #[test]
    fn test_ties_round_up() {
        // 10 - 1 (count) - 0.5 (pattern) - 1.5 - 1.5 (ambiguous) = 5.5
        let flow = Flow::new("tie")
            .step(Step::new("a", UiPattern::Navigation).ambiguous())
            .step(Step::new("b", UiPattern::Other))
            .step(Step::new("c", UiPattern::Navigation).ambiguous())
            .step(Step::new("d", UiPattern::Navigation));
        let evaluation = Evaluator::default().evaluate_detailed(&flow).unwrap();
        assert_eq!(evaluation.breakdown.raw_score, 5.5);
        assert_eq!(evaluation.verdict.ease_score, 6);
    }

    #[test]
    fn test_ten_ambiguous_steps_clamp_to_floor() {
        let steps = (1..=10)
            .map(|i| Step::new(format!("guess {}", i), UiPattern::Navigation).ambiguous())
            .collect();
        let evaluation = Evaluator::default()
            .evaluate_detailed(&Flow::with_steps("guessing", steps))
            .unwrap();
        assert_eq!(evaluation.verdict.ease_score, 1);
        assert!(evaluation.verdict.justification.contains("count penalty capped at 5.0."));
        assert!(evaluation.verdict.justification.contains("clamped to 1.0"));
    }

    #[test]
    fn test_empty_flow_is_invalid_input() {
        let err = evaluate(&Flow::new("nothing")).unwrap_err();
        assert!(matches!(err, EaseError::InvalidInput { .. }));
    }

    #[test]
    fn test_non_finite_weight_is_validation_error() {
        let weights = ScoringWeights::default().with_ambiguous_penalty(f64::NAN);
        let evaluator = Evaluator::new(weights);
        let flow = clean_flow(2).step(Step::new("oops", UiPattern::Navigation).ambiguous());
        let err = evaluator.evaluate(&flow).unwrap_err();
        assert!(matches!(err, EaseError::Validation { .. }));
    }

    #[test]
    fn test_try_new_rejects_bad_weights() {
        assert!(Evaluator::try_new(ScoringWeights::default().with_other_pattern_penalty(-0.5)).is_err());
        assert!(Evaluator::try_new(ScoringWeights::default()).is_ok());
    }

    #[test]
    fn test_fractional_weights_in_justification() {
        let evaluator = Evaluator::new(ScoringWeights::default().with_other_pattern_penalty(0.25));
        let flow = Flow::new("g").step(Step::new("odd", UiPattern::Other));
        let verdict = evaluator.evaluate(&flow).unwrap();
        assert!(verdict.justification.contains("penalty 0.25."));
        assert_eq!(verdict.ease_score, 10);
    }
}
