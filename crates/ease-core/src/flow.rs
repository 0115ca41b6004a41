//! Interaction flow types
//!
//! A [`Flow`] is the ordered list of [`Step`]s a user performs to reach one
//! goal. Flows are built by the caller per evaluation request and are never
//! mutated by the evaluator.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{EaseError, EaseResult};

/// Interaction type of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiPattern {
    /// Moving between screens, tabs or menus
    Navigation,
    /// Typing into a field
    FormInput,
    /// Picking among presented options
    Selection,
    /// Saving, submitting or confirming
    Confirmation,
    /// Searching or filtering
    Search,
    /// Swipes, drags, long presses
    Gesture,
    /// Anything that does not follow a common UI pattern
    #[default]
    Other,
}

impl UiPattern {
    /// Wire name of the pattern
    pub fn as_str(&self) -> &'static str {
        match self {
            UiPattern::Navigation => "navigation",
            UiPattern::FormInput => "form_input",
            UiPattern::Selection => "selection",
            UiPattern::Confirmation => "confirmation",
            UiPattern::Search => "search",
            UiPattern::Gesture => "gesture",
            UiPattern::Other => "other",
        }
    }

    /// Whether this pattern counts as a common, recognisable interaction
    pub fn is_standard(&self) -> bool {
        !matches!(self, UiPattern::Other)
    }

    /// Get all patterns
    pub fn all() -> &'static [UiPattern] {
        &[
            UiPattern::Navigation,
            UiPattern::FormInput,
            UiPattern::Selection,
            UiPattern::Confirmation,
            UiPattern::Search,
            UiPattern::Gesture,
            UiPattern::Other,
        ]
    }
}

impl std::fmt::Display for UiPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UiPattern {
    type Err = EaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        UiPattern::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                EaseError::invalid_input_field(format!("Unknown UI pattern '{}'", s), "ui_pattern")
            })
    }
}

/// One user action in a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Free text describing the action
    pub description: String,

    /// Interaction type
    #[serde(default)]
    pub ui_pattern: UiPattern,

    /// True if the step could confuse a typical user
    #[serde(default)]
    pub ambiguous: bool,
}

impl Step {
    /// Create a new, unambiguous step
    pub fn new(description: impl Into<String>, ui_pattern: UiPattern) -> Self {
        Self {
            description: description.into(),
            ui_pattern,
            ambiguous: false,
        }
    }

    /// Mark the step as a potential point of confusion
    pub fn ambiguous(mut self) -> Self {
        self.ambiguous = true;
        self
    }

    /// Set the ambiguity flag explicitly
    pub fn with_ambiguous(mut self, ambiguous: bool) -> Self {
        self.ambiguous = ambiguous;
        self
    }
}

/// The ordered steps for one goal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flow {
    /// What the user is trying to accomplish
    #[serde(default)]
    pub goal: String,

    /// Steps in temporal order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Flow {
    /// Create an empty flow for a goal
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            steps: Vec::new(),
        }
    }

    /// Create a flow from existing steps
    pub fn with_steps(goal: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            goal: goal.into(),
            steps,
        }
    }

    /// Append a step
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the flow has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 1-based positions of ambiguous steps
    pub fn ambiguous_positions(&self) -> Vec<usize> {
        self.positions(|s| s.ambiguous)
    }

    /// 1-based positions of steps that use a non-standard pattern
    pub fn non_standard_positions(&self) -> Vec<usize> {
        self.positions(|s| !s.ui_pattern.is_standard())
    }

    fn positions(&self, pred: impl Fn(&Step) -> bool) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, s)| pred(s))
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Check that the flow can be scored
    pub fn validate(&self) -> EaseResult<()> {
        if self.steps.is_empty() {
            return Err(EaseError::invalid_input_field(
                "Flow has no steps",
                "steps",
            ));
        }

        for (i, step) in self.steps.iter().enumerate() {
            if step.description.trim().is_empty() {
                return Err(EaseError::invalid_input_field(
                    format!("Step {} has an empty description", i + 1),
                    format!("steps[{}].description", i),
                ));
            }
        }

        Ok(())
    }
}
