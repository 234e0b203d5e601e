use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The feedback string used when a bullet needs no changes.
pub const CONCISE_AND_SPECIFIC: &str = "concise and specific";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    NeedsImprovement,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Good => "good",
            Verdict::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Outcome of assessing a single bullet.
///
/// `original` always holds the anonymized text, never the raw input.
/// Built once per bullet and validated before it leaves the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletFeedback {
    pub original: String,
    pub verdict: Verdict,
    pub feedback: String,
    pub clarifying_questions: Vec<String>,
    pub suggestions: Vec<String>,
    /// Informational only: role, seniority, style, tone and the producing model.
    pub metadata: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Verdict::NeedsImprovement).unwrap(),
            "\"needs_improvement\""
        );
        assert_eq!(serde_json::to_string(&Verdict::Good).unwrap(), "\"good\"");
    }

    #[test]
    fn test_feedback_json_keys_in_declared_order() {
        let mut metadata = Map::new();
        metadata.insert("role".to_string(), Value::from("Data Engineer"));
        metadata.insert("model".to_string(), Value::from("dry-run"));

        let fb = BulletFeedback {
            original: "Built API for ingestion".to_string(),
            verdict: Verdict::NeedsImprovement,
            feedback: "missing scope or outcome".to_string(),
            clarifying_questions: vec![],
            suggestions: vec!["Built API for ingestion by automation".to_string()],
            metadata,
        };

        let json = serde_json::to_string(&fb).unwrap();
        let keys = [
            "\"original\"",
            "\"verdict\"",
            "\"feedback\"",
            "\"clarifying_questions\"",
            "\"suggestions\"",
            "\"metadata\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");

        // metadata keeps insertion order
        assert!(json.find("\"role\"").unwrap() < json.find("\"model\"").unwrap());
    }

    #[test]
    fn test_feedback_round_trips_through_json_value() {
        let fb = BulletFeedback {
            original: "Led migration".to_string(),
            verdict: Verdict::Good,
            feedback: CONCISE_AND_SPECIFIC.to_string(),
            clarifying_questions: vec![],
            suggestions: vec![],
            metadata: Map::new(),
        };
        let value = serde_json::to_value(&fb).unwrap();
        assert_eq!(value["verdict"], "good");
        assert!(value["suggestions"].is_array());

        let back: BulletFeedback = serde_json::from_value(value).unwrap();
        assert_eq!(back.verdict, Verdict::Good);
    }
}
