//! Keyword rules for step classification

use serde::{Deserialize, Serialize};

use crate::error::{EaseError, EaseResult};
use crate::flow::UiPattern;

/// Keywords that classify a step as one UI pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: UiPattern,
    pub keywords: Vec<String>,
}

impl PatternRule {
    pub fn new(pattern: UiPattern, keywords: &[&str]) -> Self {
        Self {
            pattern,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Transcript classification settings
///
/// Rules are tried in order; the first rule with a matching keyword decides
/// the pattern. A step matching no rule is classified as `other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Ordered pattern rules
    pub rules: Vec<PatternRule>,

    /// Phrases that mark a step as a potential point of confusion
    pub ambiguity_cues: Vec<String>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                PatternRule::new(UiPattern::Search, &["search", "find", "look up", "filter", "query"]),
                PatternRule::new(
                    UiPattern::FormInput,
                    &["type", "enter", "fill", "fill in", "input", "write", "paste"],
                ),
                PatternRule::new(
                    UiPattern::Selection,
                    &["select", "choose", "pick", "check", "uncheck", "toggle", "dropdown", "drop-down", "option"],
                ),
                PatternRule::new(
                    UiPattern::Confirmation,
                    &["save", "submit", "confirm", "send", "apply", "ok", "done", "accept", "finish", "publish"],
                ),
                PatternRule::new(
                    UiPattern::Gesture,
                    &["swipe", "drag", "pinch", "scroll", "long press", "long-press", "double tap", "double-tap", "shake"],
                ),
                PatternRule::new(
                    UiPattern::Navigation,
                    &["navigate", "go to", "open", "click", "tap", "press", "back", "menu", "tab", "visit", "return", "launch"],
                ),
            ],
            ambiguity_cues: [
                "unlabeled",
                "unlabelled",
                "hidden",
                "hamburger",
                "three dots",
                "three-dot",
                "kebab",
                "ellipsis",
                "overflow menu",
                "hover",
                "right-click",
                "right click",
                "long press",
                "long-press",
                "unclear",
                "not obvious",
                "somewhere",
                "small icon",
                "icon-only",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl TranscriptConfig {
    /// Check the rules are usable
    pub fn validate(&self) -> EaseResult<()> {
        for rule in &self.rules {
            if rule.pattern == UiPattern::Other {
                return Err(EaseError::config(
                    "transcript rules cannot target the 'other' pattern; it is the fallback",
                ));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(EaseError::config(format!(
                    "transcript rule for '{}' contains an empty keyword",
                    rule.pattern
                )));
            }
        }
        if self.ambiguity_cues.iter().any(|c| c.trim().is_empty()) {
            return Err(EaseError::config("ambiguity_cues contains an empty phrase"));
        }
        Ok(())
    }
}
