//! Keyword-based step classification

use regex::{Regex, RegexBuilder};

use super::TranscriptConfig;
use crate::error::{EaseError, EaseResult};
use crate::flow::UiPattern;

/// Compiled form of a [`TranscriptConfig`]
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(UiPattern, Regex)>,
    ambiguity: Option<Regex>,
}

impl KeywordClassifier {
    /// Compile the keyword rules
    pub fn new(config: &TranscriptConfig) -> EaseResult<Self> {
        config.validate()?;

        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            if let Some(regex) = word_alternation(&rule.keywords)? {
                rules.push((rule.pattern, regex));
            }
        }

        Ok(Self {
            rules,
            ambiguity: word_alternation(&config.ambiguity_cues)?,
        })
    }

    /// Pattern of the first matching rule, `other` if none matches
    pub fn pattern(&self, description: &str) -> UiPattern {
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(description))
            .map(|(pattern, _)| *pattern)
            .unwrap_or(UiPattern::Other)
    }

    /// True if the description contains an ambiguity cue
    pub fn is_ambiguous(&self, description: &str) -> bool {
        self.ambiguity
            .as_ref()
            .is_some_and(|regex| regex.is_match(description))
    }
}

/// Case-insensitive, word-bounded alternation of phrases
fn word_alternation(phrases: &[String]) -> EaseResult<Option<Regex>> {
    if phrases.is_empty() {
        return Ok(None);
    }

    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p.trim()))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| EaseError::config(format!("Invalid keyword rule: {}", e)))
}
