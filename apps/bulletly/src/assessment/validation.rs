//! Feedback validator — the single gate every `BulletFeedback` passes before
//! it is returned. A failure here rejects that one bullet, nothing more.

use thiserror::Error;

use crate::assessment::normalizer::{anonymize, extract_numbers};
use crate::models::feedback::{BulletFeedback, Verdict};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("original text still contains unredacted sensitive data")]
    UnredactedOriginal,

    #[error("verdict is good but {suggestions} suggestions and {questions} clarifying questions are attached")]
    GoodWithExtras { suggestions: usize, questions: usize },

    #[error("Expected {expected} suggestions, got {actual}")]
    SuggestionCount { expected: usize, actual: usize },

    #[error("Expected number {0} to be preserved")]
    MissingNumber(String),
}

/// Checks structural and numeric-preservation invariants, in order.
/// Under keep-metrics every number of the original must appear in the joined
/// suggestions, whatever the verdict.
pub fn validate(
    feedback: &BulletFeedback,
    n_expected: usize,
    keep_metrics: bool,
    original_has_numbers: bool,
) -> Result<(), ValidationError> {
    if anonymize(&feedback.original) != feedback.original {
        return Err(ValidationError::UnredactedOriginal);
    }

    match feedback.verdict {
        Verdict::Good => {
            if !feedback.suggestions.is_empty() || !feedback.clarifying_questions.is_empty() {
                return Err(ValidationError::GoodWithExtras {
                    suggestions: feedback.suggestions.len(),
                    questions: feedback.clarifying_questions.len(),
                });
            }
        }
        Verdict::NeedsImprovement => {
            if feedback.suggestions.len() != n_expected {
                return Err(ValidationError::SuggestionCount {
                    expected: n_expected,
                    actual: feedback.suggestions.len(),
                });
            }
        }
    }

    if keep_metrics && original_has_numbers {
        let all_text = feedback.suggestions.join(" ");
        if let Some(missing) = extract_numbers(&feedback.original)
            .into_iter()
            .find(|num| !all_text.contains(num.as_str()))
        {
            return Err(ValidationError::MissingNumber(missing));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn feedback(original: &str, verdict: Verdict, suggestions: &[&str]) -> BulletFeedback {
        BulletFeedback {
            original: original.to_string(),
            verdict,
            feedback: "vague or weak verb".to_string(),
            clarifying_questions: vec![],
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            metadata: Map::new(),
        }
    }

    #[test]
    fn test_valid_needs_improvement_passes() {
        let fb = feedback("Built API", Verdict::NeedsImprovement, &["a", "b"]);
        assert_eq!(validate(&fb, 2, false, false), Ok(()));
    }

    #[test]
    fn test_wrong_suggestion_count_fails() {
        let fb = feedback("Built API", Verdict::NeedsImprovement, &["a"]);
        let err = validate(&fb, 2, false, false).unwrap_err();
        assert_eq!(err, ValidationError::SuggestionCount { expected: 2, actual: 1 });
        assert_eq!(err.to_string(), "Expected 2 suggestions, got 1");
    }

    #[test]
    fn test_good_verdict_ignores_requested_count() {
        let fb = feedback("Led the migration", Verdict::Good, &[]);
        assert_eq!(validate(&fb, 3, false, false), Ok(()));
    }

    #[test]
    fn test_good_verdict_with_suggestions_fails() {
        let fb = feedback("Led the migration", Verdict::Good, &["a"]);
        assert!(matches!(
            validate(&fb, 1, false, false),
            Err(ValidationError::GoodWithExtras { suggestions: 1, .. })
        ));
    }

    #[test]
    fn test_unredacted_original_fails() {
        let fb = feedback("Mailed jane@acme.io", Verdict::NeedsImprovement, &["a"]);
        assert_eq!(
            validate(&fb, 1, false, false),
            Err(ValidationError::UnredactedOriginal)
        );
    }

    #[test]
    fn test_numbers_must_be_preserved() {
        let fb = feedback(
            "Reduced latency by 40% across 3 services",
            Verdict::NeedsImprovement,
            &["Cut latency 40%", "Faster services"],
        );
        let err = validate(&fb, 2, true, true).unwrap_err();
        assert_eq!(err, ValidationError::MissingNumber("3".to_string()));
        assert_eq!(err.to_string(), "Expected number 3 to be preserved");
    }

    #[test]
    fn test_numbers_found_across_suggestions() {
        let fb = feedback(
            "Reduced latency by 40% across 3 services",
            Verdict::NeedsImprovement,
            &["Cut latency 40%", "Sped up 3 services"],
        );
        assert_eq!(validate(&fb, 2, true, true), Ok(()));
    }

    #[test]
    fn test_number_check_applies_to_good_verdict() {
        let fb = feedback("Reduced spend by 35%", Verdict::Good, &[]);
        assert_eq!(
            validate(&fb, 2, true, true),
            Err(ValidationError::MissingNumber("35".to_string()))
        );
    }

    #[test]
    fn test_number_check_off_without_keep_metrics() {
        let fb = feedback("Handled 500 tickets", Verdict::NeedsImprovement, &["Handled tickets"]);
        assert_eq!(validate(&fb, 1, false, true), Ok(()));
    }
}
