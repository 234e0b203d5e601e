//! Bullet assessment — orchestrates the full pipeline for one bullet.
//!
//! Flow: trim → anonymize → critique (+ clarifying questions, + banned words) →
//!       verdict → generate suggestions (needs_improvement only) →
//!       numeric policy → validate → return.
//!
//! Each call is independent; nothing is shared between bullets except the
//! read-only generator.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::assessment::critic::review;
use crate::assessment::metrics::enforce;
use crate::assessment::normalizer::{anonymize, has_numbers};
use crate::assessment::styles::{Style, Tone};
use crate::assessment::suggestions::{SuggestionGenerator, SuggestionRequest};
use crate::assessment::validation::{validate, ValidationError};
use crate::models::feedback::{BulletFeedback, Verdict};

pub const DEFAULT_SUGGESTION_COUNT: usize = 2;

/// Caller-controlled knobs for one assessment run.
#[derive(Debug, Clone)]
pub struct AssessOptions {
    pub role: String,
    pub seniority: String,
    pub style: Style,
    pub tone: Tone,
    pub keep_metrics: bool,
    /// Number of suggestions wanted when a bullet needs improvement.
    pub n: usize,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            role: String::new(),
            seniority: String::new(),
            style: Style::default(),
            tone: Tone::default(),
            keep_metrics: false,
            n: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

/// Assesses one bullet and returns validated feedback.
///
/// Only a validation failure is an error; `needs_improvement` is a normal result.
pub async fn assess_bullet(
    bullet: &str,
    options: &AssessOptions,
    generator: &dyn SuggestionGenerator,
) -> Result<BulletFeedback, ValidationError> {
    let raw = bullet.trim();
    let original_has_numbers = has_numbers(raw);
    let sanitized = anonymize(raw);

    let report = review(&sanitized);
    let verdict = report.verdict();
    debug!("Critique for bullet: {} ({:?})", report.critique, verdict);

    let suggestions = match verdict {
        Verdict::Good => Vec::new(),
        Verdict::NeedsImprovement => {
            let request = SuggestionRequest {
                text: &sanitized,
                role: &options.role,
                seniority: &options.seniority,
                style: options.style,
                tone: options.tone,
                keep_metrics: options.keep_metrics,
                n: options.n,
            };
            let generated = generator.generate(&request).await.unwrap_or_else(|e| {
                warn!("{} generator returned no suggestions: {e}", generator.label());
                Vec::new()
            });
            enforce(
                generated,
                &sanitized,
                options.keep_metrics,
                original_has_numbers,
            )
        }
    };

    let feedback = BulletFeedback {
        feedback: report.summary(),
        original: sanitized,
        verdict,
        clarifying_questions: report.clarifying_questions,
        suggestions,
        metadata: build_metadata(options, generator.label()),
    };

    validate(
        &feedback,
        options.n,
        options.keep_metrics,
        original_has_numbers,
    )?;

    info!(
        "Assessed bullet: verdict={}, suggestions={}",
        feedback.verdict.as_str(),
        feedback.suggestions.len()
    );
    Ok(feedback)
}

fn build_metadata(options: &AssessOptions, model: &str) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("role".to_string(), Value::from(options.role.as_str()));
    metadata.insert("seniority".to_string(), Value::from(options.seniority.as_str()));
    metadata.insert("style".to_string(), Value::from(options.style.as_str()));
    metadata.insert("tone".to_string(), Value::from(options.tone.as_str()));
    metadata.insert("model".to_string(), Value::from(model));
    metadata
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
