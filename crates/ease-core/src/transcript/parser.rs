//! Step log parser

use std::sync::LazyLock;

use regex::Regex;

use super::{KeywordClassifier, TranscriptConfig};
use crate::error::{EaseError, EaseResult};
use crate::flow::{Flow, Step, UiPattern};

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.+?)\s*$").expect("valid numbered pattern"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.+?)\s*$").expect("valid bullet pattern"));
static STEP_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#{1,6}\s*step\s+\d+\s*[:.)-]?\s*(.*?)\s*$").expect("valid heading pattern")
});
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s+(.+?)\s*$").expect("valid heading pattern"));
static GOAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\*\*)?(?:task|goal)\s*:\s*(?:\*\*)?\s*(.+?)\s*$")
        .expect("valid goal pattern")
});
static TRAILING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[([^\[\]]+)\]\s*$").expect("valid tag pattern"));

/// Parser from step logs to flows
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    classifier: KeywordClassifier,
}

impl TranscriptParser {
    /// Create a parser with the given keyword rules
    pub fn new(config: &TranscriptConfig) -> EaseResult<Self> {
        Ok(Self {
            classifier: KeywordClassifier::new(config)?,
        })
    }

    /// Parse a step log into a flow
    ///
    /// Numbered lines and `Step N` headings are steps. Bullet lines are
    /// steps only when the log has neither. Lines inside code fences are
    /// ignored.
    pub fn parse(&self, text: &str) -> EaseResult<Flow> {
        let lines = prose_lines(text);

        let mut descriptions = ordered_steps(&lines);
        if descriptions.is_empty() {
            descriptions = lines
                .iter()
                .filter_map(|line| BULLET.captures(line).map(|c| c[1].to_string()))
                .collect();
        }

        let steps: Vec<Step> = descriptions
            .iter()
            .map(|d| self.classify_step(d))
            .filter(|s| !s.description.is_empty())
            .collect();

        if steps.is_empty() {
            return Err(EaseError::invalid_input_field(
                "Transcript contains no recognisable steps",
                "transcript",
            ));
        }
        let goal = find_goal(&lines).unwrap_or_default();

        tracing::debug!(goal = %goal, steps = steps.len(), "parsed transcript");
        Ok(Flow::with_steps(goal, steps))
    }

    /// Build a step from one description, honouring trailing tags
    ///
    /// `[ambiguous]` marks the step ambiguous and `[<pattern>]` forces its
    /// pattern; any other bracketed text stays part of the description.
    pub fn classify_step(&self, description: &str) -> Step {
        let mut text = description.trim().to_string();
        let mut forced_pattern = None;
        let mut tagged_ambiguous = false;

        while let Some(caps) = TRAILING_TAG.captures(&text) {
            let tag = caps[1].trim().to_lowercase();
            let start = caps.get(0).map_or(text.len(), |m| m.start());
            if tag == "ambiguous" {
                tagged_ambiguous = true;
            } else if let Ok(pattern) = tag.parse::<UiPattern>() {
                forced_pattern.get_or_insert(pattern);
            } else {
                break;
            }
            text.truncate(start);
        }

        let ui_pattern = forced_pattern.unwrap_or_else(|| self.classifier.pattern(&text));
        let ambiguous = tagged_ambiguous || self.classifier.is_ambiguous(&text);
        Step::new(text, ui_pattern).with_ambiguous(ambiguous)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new(&TranscriptConfig::default()).expect("default transcript rules compile")
    }
}

/// Lines outside code fences
fn prose_lines(text: &str) -> Vec<&str> {
    let mut in_fence = false;
    text.lines()
        .filter(|line| {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                return false;
            }
            !in_fence
        })
        .collect()
}

/// Numbered lines and `Step N` headings, in order
fn ordered_steps(lines: &[&str]) -> Vec<String> {
    let mut steps = Vec::new();
    let mut awaiting_body = false;

    for line in lines {
        if let Some(caps) = STEP_HEADING.captures(line) {
            let inline = caps[1].trim();
            awaiting_body = inline.is_empty();
            if !awaiting_body {
                steps.push(inline.to_string());
            }
            continue;
        }

        if let Some(caps) = NUMBERED.captures(line) {
            awaiting_body = false;
            steps.push(caps[1].to_string());
            continue;
        }

        if awaiting_body && !line.trim().is_empty() && !HEADING.is_match(line) {
            let body = BULLET
                .captures(line)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| line.trim().to_string());
            steps.push(body);
            awaiting_body = false;
        }
    }

    steps
}

/// Goal line, else the intro line before the first step, else the first heading
fn find_goal(lines: &[&str]) -> Option<String> {
    if let Some(goal) = lines
        .iter()
        .find_map(|line| GOAL_LINE.captures(line).map(|c| c[1].to_string()))
    {
        return Some(goal);
    }

    let first_step = lines
        .iter()
        .position(|line| {
            NUMBERED.is_match(line) || BULLET.is_match(line) || STEP_HEADING.is_match(line)
        })
        .unwrap_or(lines.len());

    let intro = lines[..first_step]
        .iter()
        .map(|line| line.trim())
        .find(|line| line.ends_with(':') && !HEADING.is_match(line));
    if let Some(intro) = intro {
        let intro = intro.trim_end_matches(':').trim();
        let intro = match intro.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("to ") => &intro[3..],
            _ => intro,
        };
        if !intro.is_empty() {
            return Some(intro.to_string());
        }
    }

    lines
        .iter()
        .filter(|line| !STEP_HEADING.is_match(line))
        .find_map(|line| HEADING.captures(line).map(|c| c[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL_STEPS: &str = r#"
    To send an email:
    1. Click the "New Email" button in the top left
    2. Enter recipient email address in the "To" field
    3. Click in the "Subject" field and type the subject
    4. Click in the message body area and type the message
    5. Click the "Send" button at the bottom
    "#;

    #[test]
    fn test_numbered_instructions() {
        let flow = TranscriptParser::default().parse(EMAIL_STEPS).unwrap();
        assert_eq!(flow.goal, "send an email");
        assert_eq!(flow.len(), 5);
        assert_eq!(flow.steps[0].ui_pattern, UiPattern::Navigation);
        assert_eq!(flow.steps[1].ui_pattern, UiPattern::FormInput);
        assert_eq!(flow.steps[4].ui_pattern, UiPattern::Confirmation);
        assert!(flow.ambiguous_positions().is_empty());
    }

    #[test]
    fn test_step_headings() {
        let log = r#"# Execution Log

**Task:** Turn on dark mode

## Step 1
Tap the gear icon

## Step 2: Scroll to Appearance

## Step 3
- Toggle "Dark mode" [ambiguous]

```
screenshot: 1. not a step
```
"#;
        let flow = TranscriptParser::default().parse(log).unwrap();
        assert_eq!(flow.goal, "Turn on dark mode");
        assert_eq!(flow.len(), 3);
        assert_eq!(flow.steps[0].description, "Tap the gear icon");
        assert_eq!(flow.steps[1].ui_pattern, UiPattern::Gesture);
        assert_eq!(flow.steps[2].description, "Toggle \"Dark mode\"");
        assert_eq!(flow.steps[2].ui_pattern, UiPattern::Selection);
        assert!(flow.steps[2].ambiguous);
    }

    #[test]
    fn test_bullets_when_no_numbers() {
        let log = "# Archive a note\n- Long press the note\n- Tap the archive box [other]\n";
        let flow = TranscriptParser::default().parse(log).unwrap();
        assert_eq!(flow.goal, "Archive a note");
        assert_eq!(flow.len(), 2);
        assert_eq!(flow.steps[0].ui_pattern, UiPattern::Gesture);
        assert!(flow.steps[0].ambiguous);
        assert_eq!(flow.steps[1].ui_pattern, UiPattern::Other);
        assert_eq!(flow.steps[1].description, "Tap the archive box");
    }

    #[test]
    fn test_unknown_tag_kept() {
        let step = TranscriptParser::default().classify_step("Press [Ctrl+S]");
        assert_eq!(step.description, "Press [Ctrl+S]");
        assert_eq!(step.ui_pattern, UiPattern::Navigation);
    }

    #[test]
    fn test_no_steps_is_invalid_input() {
        let err = TranscriptParser::default()
            .parse("Just some prose without any steps.")
            .unwrap_err();
        assert!(matches!(err, EaseError::InvalidInput { .. }));
    }
}
