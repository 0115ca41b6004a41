//! Validation of verdicts produced by a language model
//!
//! Model output often wraps the JSON in reasoning blocks or code fences.
//! Everything outside the first JSON object is ignored; the object itself
//! must match the verdict schema exactly.

use serde_json::{Deserializer, Map, Value};

use super::Verdict;
use crate::error::{EaseError, EaseResult};

const FIELDS: [&str; 3] = ["summary", "ease_score", "justification"];

/// Parse and validate a model's raw verdict output
pub fn parse_model_verdict(raw: &str) -> EaseResult<Verdict> {
    let post_think = match raw.rfind("</think>") {
        Some(idx) => &raw[idx + "</think>".len()..],
        None => raw,
    };

    let cleaned = post_think
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");

    let start = cleaned
        .find('{')
        .ok_or_else(|| EaseError::validation("No JSON object found in model output"))?;

    // Read exactly one value; whatever follows the first object is ignored.
    let value = Deserializer::from_str(&cleaned[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| EaseError::validation("No JSON object found in model output"))?
        .map_err(|e| EaseError::validation(format!("Model output is not valid JSON: {}", e)))?;

    let Value::Object(object) = value else {
        return Err(EaseError::validation("Model output must be a JSON object"));
    };

    tracing::debug!(fields = object.len(), "validating model verdict");
    verdict_from_object(&object)
}

fn verdict_from_object(object: &Map<String, Value>) -> EaseResult<Verdict> {
    if let Some(extra) = object.keys().find(|k| !FIELDS.contains(&k.as_str())) {
        return Err(EaseError::validation_field(
            format!("Unexpected field '{}' in verdict", extra),
            extra.clone(),
        ));
    }

    let summary = required_string(object, "summary")?;
    let justification = required_string(object, "justification")?;

    let score = object
        .get("ease_score")
        .ok_or_else(|| EaseError::validation_field("Missing field 'ease_score'", "ease_score"))?;
    let score = score.as_i64().ok_or_else(|| {
        EaseError::validation_field(
            format!("ease_score must be an integer, got {}", score),
            "ease_score",
        )
    })?;
    let ease_score = u8::try_from(score).map_err(|_| {
        EaseError::validation_field(
            format!("ease_score must be within [1, 10], got {}", score),
            "ease_score",
        )
    })?;

    Verdict::new(summary, ease_score, justification)
}

fn required_string(object: &Map<String, Value>, field: &str) -> EaseResult<String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(EaseError::validation_field(
            format!("{} must be a string, got {}", field, other),
            field,
        )),
        None => Err(EaseError::validation_field(
            format!("Missing field '{}'", field),
            field,
        )),
    }
}
