//! Single-flow commands: evaluate, parse, check

use std::path::Path;

use anyhow::{Context, Result};
use ease_core::{EaseConfig, Evaluator, Flow, TranscriptParser, parse_model_verdict};

use super::{Outcome, read_input};
use crate::console::CliConsole;

/// How to read an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Json,
    Yaml,
    Transcript,
}

impl InputKind {
    /// Pick the kind from the flag and the file extension. Anything that is
    /// not `.json` is read as YAML, which also accepts JSON.
    pub fn detect(path: &Path, transcript: bool) -> Self {
        if transcript {
            return InputKind::Transcript;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => InputKind::Json,
            _ => InputKind::Yaml,
        }
    }
}

/// Build a flow from input text
pub fn load_flow(config: &EaseConfig, text: &str, kind: InputKind) -> Result<Flow> {
    let flow = match kind {
        InputKind::Json => serde_json::from_str(text).context("Failed to parse flow JSON")?,
        InputKind::Yaml => serde_yaml::from_str(text).context("Failed to parse flow YAML")?,
        InputKind::Transcript => TranscriptParser::new(&config.transcript)?.parse(text)?,
    };
    Ok(flow)
}

/// Score input text and render the JSON output
pub fn render_evaluation(
    config: &EaseConfig,
    text: &str,
    kind: InputKind,
    pretty: bool,
    explain: bool,
) -> Result<String> {
    let flow = load_flow(config, text, kind)?;
    let evaluator = Evaluator::try_new(config.scoring.clone())?;

    let output = if explain {
        let evaluation = evaluator.evaluate_detailed(&flow)?;
        if pretty {
            serde_json::to_string_pretty(&evaluation)?
        } else {
            serde_json::to_string(&evaluation)?
        }
    } else {
        let verdict = evaluator.evaluate(&flow)?;
        if pretty {
            verdict.to_json_pretty()?
        } else {
            verdict.to_json()?
        }
    };
    Ok(output)
}

/// `ease evaluate`
pub async fn evaluate(
    config: &EaseConfig,
    path: &Path,
    transcript: bool,
    pretty: bool,
    explain: bool,
) -> Result<Outcome> {
    let text = read_input(path).await?;
    let kind = InputKind::detect(path, transcript);
    tracing::debug!(path = %path.display(), ?kind, "evaluating flow");

    println!("{}", render_evaluation(config, &text, kind, pretty, explain)?);
    Ok(Outcome::Clean)
}

/// `ease parse`
pub async fn parse(config: &EaseConfig, path: &Path, pretty: bool) -> Result<Outcome> {
    let text = read_input(path).await?;
    let flow = load_flow(config, &text, InputKind::Transcript)?;

    let json = if pretty {
        serde_json::to_string_pretty(&flow)?
    } else {
        serde_json::to_string(&flow)?
    };
    println!("{}", json);
    Ok(Outcome::Clean)
}

/// `ease check`
pub async fn check(path: &Path, verbose: bool) -> Result<Outcome> {
    let console = CliConsole::new(verbose);
    let text = read_input(path).await?;

    match parse_model_verdict(&text) {
        Ok(verdict) => {
            println!("{}", verdict.to_json_pretty()?);
            console.success("Verdict is valid");
            Ok(Outcome::Clean)
        }
        Err(e) => {
            console.error(&format!("Invalid verdict: {}", e));
            Ok(Outcome::Findings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const FIVE_STEPS: &str = r#"{
  "goal": "Share a photo",
  "steps": [
    {"description": "Open the gallery", "ui_pattern": "navigation"},
    {"description": "Long press the photo", "ui_pattern": "gesture", "ambiguous": true},
    {"description": "Tap Share", "ui_pattern": "navigation"},
    {"description": "Pick a contact", "ui_pattern": "selection"},
    {"description": "Shake to send", "ui_pattern": "other"}
  ]
}"#;

    #[test]
    fn test_detect_kind() {
        assert_eq!(InputKind::detect(&PathBuf::from("f.json"), false), InputKind::Json);
        assert_eq!(InputKind::detect(&PathBuf::from("f.yml"), false), InputKind::Yaml);
        assert_eq!(InputKind::detect(&PathBuf::from("-"), false), InputKind::Yaml);
        assert_eq!(InputKind::detect(&PathBuf::from("f.json"), true), InputKind::Transcript);
    }

    #[test]
    fn test_render_verdict() {
        let json = render_evaluation(&EaseConfig::default(), FIVE_STEPS, InputKind::Json, false, false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ease_score"], 6);
        assert!(value.get("breakdown").is_none());
        assert!(json.starts_with("{\"summary\":\"Step 1: Open the gallery; Step 2:"));
    }

    #[test]
    fn test_render_explain() {
        let json = render_evaluation(&EaseConfig::default(), FIVE_STEPS, InputKind::Yaml, true, true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["verdict"]["ease_score"], 6);
        assert_eq!(value["breakdown"]["raw_score"], 6.0);
        assert_eq!(value["breakdown"]["ambiguous_steps"], serde_json::json!([2]));
    }

    #[test]
    fn test_render_transcript() {
        let text = "To search:\n1. Type a name in the search bar\n2. Press Enter";
        let json = render_evaluation(&EaseConfig::default(), text, InputKind::Transcript, false, false)
            .unwrap();
        assert!(json.contains("\"ease_score\":10"));
    }

    #[test]
    fn test_configured_weights_apply() {
        let mut config = EaseConfig::default();
        config.scoring = config.scoring.with_ambiguous_penalty(0.0);
        let json = render_evaluation(&config, FIVE_STEPS, InputKind::Json, false, false).unwrap();
        assert!(json.contains("\"ease_score\":8"));
    }

    #[test]
    fn test_empty_flow_is_error() {
        let err = render_evaluation(
            &EaseConfig::default(),
            r#"{"goal": "x", "steps": []}"#,
            InputKind::Json,
            false,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Flow has no steps"));
    }

    #[test]
    fn test_malformed_flow() {
        let err = load_flow(&EaseConfig::default(), "{not json", InputKind::Json).unwrap_err();
        assert!(err.to_string().contains("Failed to parse flow JSON"));
    }

    #[tokio::test]
    async fn test_check_outcomes() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        tokio::fs::write(
            &good,
            r#"Here you go: {"summary": "Step 1: Open", "ease_score": 9, "justification": "1 step."}"#,
        )
        .await
        .unwrap();
        tokio::fs::write(
            &bad,
            r#"{"summary": "s", "ease_score": 11, "justification": "j"}"#,
        )
        .await
        .unwrap();

        assert_eq!(check(&good, false).await.unwrap(), Outcome::Clean);
        assert_eq!(check(&bad, false).await.unwrap(), Outcome::Findings);
        assert!(check(&dir.path().join("missing.txt"), false).await.is_err());
    }
}
