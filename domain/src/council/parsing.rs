//! Structured decoding of model output.
//!
//! Models are asked for JSON but answer in free text: fenced code blocks,
//! a sentence of preamble, trailing commentary. [`extract_json`] locates the
//! JSON object; the payload types give the shape each stage expects and
//! their `TryFrom` conversions validate it. They are pure domain logic with no I/O.
//!
//! | Function | Stage | Shape |
//! |----------|-------|-------|
//! | [`extract_json`] | any structured call | first `{ ... }` object |
//! | [`SynthesisPayload`] | synthesis | `{"concept", "risks", "opportunities"}` |
//! | [`EvaluationPayload`] | scoring | `{"score", "feedback"}` |

use crate::council::entities::HardenedConcept;
use crate::council::refinement::Evaluation;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why a structured response could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("schema mismatch: {0}")]
    Schema(String),
}

/// Locate and parse the JSON object embedded in a model response.
///
/// # Examples
///
/// ```
/// use council_domain::council::parsing::extract_json;
///
/// let value = extract_json("Sure!\n```json\n{\"score\": 8}\n```").unwrap();
/// assert_eq!(value["score"], 8);
/// assert!(extract_json("no braces here").is_err());
/// ```
pub fn extract_json(response: &str) -> Result<Value, DecodeError> {
    let trimmed = response.trim();

    // Whole response is JSON
    if let Ok(value) = serde_json::from_str::<Value>(trimmed)
        && value.is_object()
    {
        return Ok(value);
    }

    let start = trimmed.find('{').ok_or(DecodeError::NoJson)?;
    let end = trimmed.rfind('}').ok_or(DecodeError::NoJson)?;
    if end < start {
        return Err(DecodeError::NoJson);
    }

    let value: Value = serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::Schema("expected a JSON object".to_string()));
    }
    Ok(value)
}

/// Wire shape of a synthesis response
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisPayload {
    pub concept: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
}

impl TryFrom<SynthesisPayload> for HardenedConcept {
    type Error = DecodeError;

    fn try_from(payload: SynthesisPayload) -> Result<Self, Self::Error> {
        if payload.concept.trim().is_empty() {
            return Err(DecodeError::Schema("concept is empty".to_string()));
        }

        Ok(HardenedConcept::new(payload.concept)
            .with_risks(payload.risks)
            .with_opportunities(payload.opportunities))
    }
}

/// A score as models actually write it: a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Number(f64),
    Text(String),
}

/// Wire shape of a scoring response
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationPayload {
    pub score: RawScore,
    #[serde(default)]
    pub feedback: Value,
}

impl TryFrom<EvaluationPayload> for Evaluation {
    type Error = DecodeError;

    fn try_from(payload: EvaluationPayload) -> Result<Self, Self::Error> {
        let score = match payload.score {
            RawScore::Number(n) => n,
            RawScore::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DecodeError::Schema(format!("score {:?} is not a number", s)))?,
        };
        let feedback = payload.feedback.as_str().unwrap_or_default();

        Ok(Evaluation::new(score, feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_json() {
        let value = extract_json(r#"{"score": 71, "feedback": "ok"}"#).unwrap();
        assert_eq!(value["score"], 71);
    }

    #[test]
    fn test_extract_fenced_json_with_prose() {
        let response = r#"
Here is my evaluation:
```json
{"score": 64, "feedback": "Hook is weak"}
```
Hope that helps."#;
        let value = extract_json(response).unwrap();
        assert_eq!(value["feedback"], "Hook is weak");
    }

    #[test]
    fn test_extract_rejects_non_json() {
        assert_eq!(extract_json("Great post, 9/10"), Err(DecodeError::NoJson));
        assert!(matches!(
            extract_json("{not: json}"),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    fn hardened(json: &str) -> Result<HardenedConcept, DecodeError> {
        let payload: SynthesisPayload =
            serde_json::from_str(json).map_err(|e| DecodeError::Schema(e.to_string()))?;
        HardenedConcept::try_from(payload)
    }

    fn evaluation(json: &str) -> Result<Evaluation, DecodeError> {
        let payload: EvaluationPayload =
            serde_json::from_str(json).map_err(|e| DecodeError::Schema(e.to_string()))?;
        Evaluation::try_from(payload)
    }

    #[test]
    fn test_hardened_concept_from_payload() {
        let hardened = hardened(
            r#"{"concept": "Lead with the customer story", "risks": ["claims"], "opportunities": []}"#,
        )
        .unwrap();
        assert_eq!(hardened.concept, "Lead with the customer story");
        assert_eq!(hardened.risks, vec!["claims".to_string()]);
        assert!(hardened.opportunities.is_empty());
    }

    #[test]
    fn test_hardened_concept_lists_optional() {
        let hardened = hardened(r#"{"concept": "Short and sharp"}"#).unwrap();
        assert!(hardened.risks.is_empty());
    }

    #[test]
    fn test_hardened_concept_rejects_empty_concept() {
        assert!(matches!(
            hardened(r#"{"concept": "  "}"#),
            Err(DecodeError::Schema(_))
        ));
        assert!(matches!(
            hardened(r#"{"risks": []}"#),
            Err(DecodeError::Schema(_))
        ));
    }

    #[test]
    fn test_evaluation_number_and_string() {
        let eval = evaluation(r#"{"score": 82, "feedback": "Strong"}"#).unwrap();
        assert_eq!(eval.score, 82.0);
        assert_eq!(eval.feedback, "Strong");

        let eval = evaluation(r#"{"score": " 55 "}"#).unwrap();
        assert_eq!(eval.score, 55.0);
        assert_eq!(eval.feedback, "");
    }

    #[test]
    fn test_evaluation_clamps() {
        let eval = evaluation(r#"{"score": 250, "feedback": ""}"#).unwrap();
        assert_eq!(eval.score, 100.0);
    }

    #[test]
    fn test_evaluation_rejects_missing_or_wordy_score() {
        assert!(matches!(
            evaluation(r#"{"feedback": "no score"}"#),
            Err(DecodeError::Schema(_))
        ));
        assert!(matches!(
            evaluation(r#"{"score": "very good"}"#),
            Err(DecodeError::Schema(_))
        ));
    }
}
