//! Evaluation case definitions
//!
//! A case names a goal, supplies the flow as structured steps or as a
//! transcript, and optionally states the score range it should land in.

use std::path::{Path, PathBuf};

use ease_core::scoring::{MAX_SCORE, MIN_SCORE};
use ease_core::{EaseError, EaseResult, Step};
use serde::{Deserialize, Serialize};

/// Score range a case is expected to land in (inclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreExpectation {
    /// Lowest acceptable score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,

    /// Highest acceptable score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,
}

impl ScoreExpectation {
    /// Expect at least `min`
    pub fn at_least(min: u8) -> Self {
        Self {
            min_score: Some(min),
            max_score: None,
        }
    }

    /// Expect at most `max`
    pub fn at_most(max: u8) -> Self {
        Self {
            min_score: None,
            max_score: Some(max),
        }
    }

    /// Expect a score within `min..=max`
    pub fn between(min: u8, max: u8) -> Self {
        Self {
            min_score: Some(min),
            max_score: Some(max),
        }
    }

    /// Check whether a score satisfies the expectation
    pub fn contains(&self, score: u8) -> bool {
        self.min_score.is_none_or(|min| score >= min)
            && self.max_score.is_none_or(|max| score <= max)
    }

    /// Bounds must be scores and must not cross
    pub fn validate(&self) -> EaseResult<()> {
        for (name, bound) in [("min_score", self.min_score), ("max_score", self.max_score)] {
            if let Some(value) = bound {
                if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                    return Err(EaseError::invalid_input_field(
                        format!(
                            "{} must be between {} and {}, got {}",
                            name, MIN_SCORE, MAX_SCORE, value
                        ),
                        format!("expected.{}", name),
                    ));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_score, self.max_score) {
            if min > max {
                return Err(EaseError::invalid_input_field(
                    format!("min_score {} is greater than max_score {}", min, max),
                    "expected",
                ));
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ScoreExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min_score, self.max_score) {
            (Some(min), Some(max)) if min == max => write!(f, "{}", min),
            (Some(min), Some(max)) => write!(f, "{}-{}", min, max),
            (Some(min), None) => write!(f, ">= {}", min),
            (None, Some(max)) => write!(f, "<= {}", max),
            (None, None) => write!(f, "any"),
        }
    }
}

/// Where a case's flow comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseInput<'a> {
    /// Structured steps
    Steps(&'a [Step]),
    /// Inline transcript text
    Transcript(&'a str),
    /// Transcript file, already resolved against the case file's directory
    TranscriptFile(&'a Path),
}

/// A single evaluation case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    /// Unique identifier
    pub id: String,

    /// The goal the flow accomplishes
    pub task_statement: String,

    /// How a tester would know the goal was reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// Relative paths resolve against the directory of the case file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ScoreExpectation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Directory of the file this case was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl EvalCase {
    /// Create a case from structured steps
    pub fn from_steps(
        id: impl Into<String>,
        task_statement: impl Into<String>,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            steps: Some(steps),
            ..Self::empty(id, task_statement)
        }
    }

    /// Create a case from inline transcript text
    pub fn from_transcript(
        id: impl Into<String>,
        task_statement: impl Into<String>,
        transcript: impl Into<String>,
    ) -> Self {
        Self {
            transcript: Some(transcript.into()),
            ..Self::empty(id, task_statement)
        }
    }

    fn empty(id: impl Into<String>, task_statement: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task_statement: task_statement.into(),
            success_criteria: None,
            steps: None,
            transcript: None,
            transcript_file: None,
            expected: None,
            tags: Vec::new(),
            base_dir: None,
        }
    }

    /// Set the expected score range
    pub fn with_expected(mut self, expected: ScoreExpectation) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check whether the case carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The single flow source of this case
    pub fn input(&self) -> EaseResult<CaseInput<'_>> {
        match (&self.steps, &self.transcript, &self.transcript_file) {
            (Some(steps), None, None) => Ok(CaseInput::Steps(steps)),
            (None, Some(text), None) => Ok(CaseInput::Transcript(text)),
            (None, None, Some(path)) => Ok(CaseInput::TranscriptFile(path)),
            (None, None, None) => Err(EaseError::invalid_input_field(
                format!(
                    "Case '{}' needs one of steps, transcript or transcript_file",
                    self.id
                ),
                "steps",
            )),
            _ => Err(EaseError::invalid_input_field(
                format!(
                    "Case '{}' sets more than one of steps, transcript and transcript_file",
                    self.id
                ),
                "steps",
            )),
        }
    }

    /// Transcript file path joined onto the case file's directory
    pub fn resolved_transcript_file(&self) -> Option<PathBuf> {
        let path = self.transcript_file.as_ref()?;
        match &self.base_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// Structural checks that do not need the flow itself
    pub fn validate(&self) -> EaseResult<()> {
        if self.id.trim().is_empty() {
            return Err(EaseError::invalid_input_field(
                "Case id must not be empty",
                "id",
            ));
        }
        self.input()?;
        if let Some(expected) = &self.expected {
            expected.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ease_core::UiPattern;

    #[test]
    fn test_expectation_contains() {
        assert!(ScoreExpectation::at_least(8).contains(8));
        assert!(ScoreExpectation::at_least(8).contains(10));
        assert!(!ScoreExpectation::at_least(8).contains(7));
        assert!(ScoreExpectation::at_most(4).contains(1));
        assert!(!ScoreExpectation::at_most(4).contains(5));
        assert!(ScoreExpectation::between(5, 6).contains(6));
        assert!(ScoreExpectation::default().contains(1));
    }

    #[test]
    fn test_expectation_validation() {
        assert!(ScoreExpectation::between(3, 7).validate().is_ok());

        let err = ScoreExpectation::at_least(11).validate().unwrap_err();
        assert_eq!(err.field(), Some("expected.min_score"));

        let err = ScoreExpectation::at_most(0).validate().unwrap_err();
        assert_eq!(err.field(), Some("expected.max_score"));

        let err = ScoreExpectation::between(8, 3).validate().unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_expectation_display() {
        assert_eq!(ScoreExpectation::between(6, 6).to_string(), "6");
        assert_eq!(ScoreExpectation::between(4, 7).to_string(), "4-7");
        assert_eq!(ScoreExpectation::at_least(8).to_string(), ">= 8");
        assert_eq!(ScoreExpectation::default().to_string(), "any");
    }

    #[test]
    fn test_case_input_selection() {
        let case = EvalCase::from_steps(
            "a",
            "Open settings",
            vec![Step::new("Click the gear icon", UiPattern::Navigation)],
        );
        assert!(matches!(case.input().unwrap(), CaseInput::Steps(steps) if steps.len() == 1));

        let case = EvalCase::from_transcript("b", "Search", "1. Type a query");
        assert!(matches!(case.input().unwrap(), CaseInput::Transcript(_)));
    }

    #[test]
    fn test_case_without_input() {
        let case = EvalCase::empty("none", "Nothing");
        let err = case.validate().unwrap_err();
        assert!(err.message().contains("needs one of"));
    }

    #[test]
    fn test_case_with_two_inputs() {
        let mut case = EvalCase::from_transcript("both", "Search", "1. Type");
        case.steps = Some(vec![Step::new("Type", UiPattern::Search)]);
        let err = case.validate().unwrap_err();
        assert!(err.message().contains("more than one"));
    }

    #[test]
    fn test_blank_id_rejected() {
        let case = EvalCase::from_transcript("  ", "Search", "1. Type");
        assert_eq!(case.validate().unwrap_err().field(), Some("id"));
    }

    #[test]
    fn test_transcript_file_resolution() {
        let mut case = EvalCase::empty("f", "Goal");
        case.transcript_file = Some(PathBuf::from("logs/run.md"));
        assert_eq!(
            case.resolved_transcript_file(),
            Some(PathBuf::from("logs/run.md"))
        );

        case.base_dir = Some(PathBuf::from("/cases"));
        assert_eq!(
            case.resolved_transcript_file(),
            Some(PathBuf::from("/cases/logs/run.md"))
        );
    }

    #[test]
    fn test_deserialize_yaml_case() {
        let yaml = r#"
id: send-email
task_statement: Send an email
success_criteria: Email appears in Sent
steps:
  - description: Click "New Email"
    ui_pattern: navigation
  - description: Swipe the draft away
tags: [email, smoke]
expected: { min_score: 8 }
"#;
        let case: EvalCase = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case.id, "send-email");
        assert_eq!(case.success_criteria.as_deref(), Some("Email appears in Sent"));
        let steps = case.steps.as_ref().unwrap();
        assert_eq!(steps[1].ui_pattern, UiPattern::Other);
        assert!(case.has_tag("smoke"));
        assert_eq!(case.expected, Some(ScoreExpectation::at_least(8)));
    }
}
