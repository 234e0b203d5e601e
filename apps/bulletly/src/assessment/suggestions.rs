//! Suggestion generation — pluggable, trait-based rewriters for bullets that
//! need improvement.
//!
//! - `OfflineGenerator`: local templates, pure and deterministic.
//! - `OnlineGenerator`: asks the completion service for rewrites.
//! - `FallbackGenerator`: tries a primary generator and, on any failure, returns
//!   the fallback's output instead. Online mode is always wrapped this way, so
//!   generation never fails outward.
//!
//! Callers hold a `Box<dyn SuggestionGenerator>` built once by `build_generator`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assessment::prompts::build_rewrite_messages;
use crate::assessment::styles::{Style, Tone};
use crate::llm_client::{strip_json_fences, CompletionClient, CompletionRequest, LlmError};

/// Label recorded as the producing model for local template output.
pub const OFFLINE_LABEL: &str = "dry-run";

/// Hard cap on the length of a templated suggestion.
pub const MAX_SUGGESTION_CHARS: usize = 140;

/// Technology names surfaced by the "using ..." template, in display order.
pub const TECH_KEYWORDS: &[&str] = &[
    "python",
    "sql",
    "spark",
    "airflow",
    "kafka",
    "aws",
    "gcp",
    "docker",
    "kubernetes",
];

const TEMPLATE_COUNT: usize = 3;
const METHOD_PHRASE: &str = "automation and query tuning";
const IMPACT_PHRASE: &str = "throughput or latency";

// ────────────────────────────────────────────────────────────────────────────
// Request / error types
// ────────────────────────────────────────────────────────────────────────────

/// Inputs shared by every generator. `text` is the anonymized bullet.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRequest<'a> {
    pub text: &'a str,
    pub role: &'a str,
    pub seniority: &'a str,
    pub style: Style,
    pub tone: Tone,
    pub keep_metrics: bool,
    pub n: usize,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion call failed: {0}")]
    Completion(#[from] LlmError),

    #[error("empty suggestions from completion response")]
    Empty,
}

/// Model parameters for online generation.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(&self, request: &SuggestionRequest<'_>)
        -> Result<Vec<String>, GenerationError>;

    /// Identifies the producer in result metadata.
    fn label(&self) -> &str;
}

/// Offline templates when `dry_run` is set or no completion client exists;
/// otherwise the completion service with offline fallback.
pub fn build_generator(
    dry_run: bool,
    client: Option<Arc<dyn CompletionClient>>,
    settings: ModelSettings,
) -> Box<dyn SuggestionGenerator> {
    match client {
        Some(client) if !dry_run => Box::new(FallbackGenerator::new(
            Box::new(OnlineGenerator::new(client, settings)),
            Box::new(OfflineGenerator),
        )),
        _ => Box::new(OfflineGenerator),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Offline templates
// ────────────────────────────────────────────────────────────────────────────

pub struct OfflineGenerator;

#[async_trait]
impl SuggestionGenerator for OfflineGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<String>, GenerationError> {
        Ok(offline_suggestions(
            request.text,
            request.style,
            request.tone,
            request.n,
        ))
    }

    fn label(&self) -> &str {
        OFFLINE_LABEL
    }
}

/// Tech keywords present in `text` (case-insensitive substring match).
pub fn detect_tech_words(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .collect()
}

/// Builds `n` suggestions by cycling templates and style verbs by index.
///
/// Tone does not change template output.
pub fn offline_suggestions(text: &str, style: Style, _tone: Tone, n: usize) -> Vec<String> {
    let verbs = style.verbs();
    let techs = detect_tech_words(text).join(", ");

    (0..n)
        .map(|i| {
            let verb = verbs[i % verbs.len()];
            let raw = match i % TEMPLATE_COUNT {
                0 => format!("{verb} {text} by {METHOD_PHRASE}"),
                1 => format!("{verb} {text}, improving {IMPACT_PHRASE}"),
                _ if !techs.is_empty() => format!("{verb} {text} using {techs}"),
                _ => format!("{verb} {text}"),
            };
            shorten(&raw, MAX_SUGGESTION_CHARS)
        })
        .collect()
}

/// Collapses whitespace and cuts to at most `width` characters on a word
/// boundary, without an ellipsis. A first word longer than `width` is hard-cut.
pub fn shorten(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let mut out = String::new();
    let mut len = 0;
    for word in collapsed.split(' ') {
        let word_len = word.chars().count();
        let needed = if out.is_empty() { word_len } else { len + 1 + word_len };
        if needed > width {
            if out.is_empty() {
                out = word.chars().take(width).collect();
            }
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        len = needed;
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Online generation
// ────────────────────────────────────────────────────────────────────────────

pub struct OnlineGenerator {
    client: Arc<dyn CompletionClient>,
    settings: ModelSettings,
}

impl OnlineGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, settings: ModelSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl SuggestionGenerator for OnlineGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<String>, GenerationError> {
        let completion = CompletionRequest {
            messages: build_rewrite_messages(request),
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let content = self.client.complete(&completion).await?;
        parse_suggestions(&content, request.n).ok_or(GenerationError::Empty)
    }

    fn label(&self) -> &str {
        &self.settings.model
    }
}

type ParseAttempt = fn(&str, usize) -> Option<Vec<String>>;

/// Response shapes tried in order; the first attempt that recognises the shape wins.
const PARSE_ATTEMPTS: &[(&str, ParseAttempt)] = &[
    ("suggestions_object", from_suggestions_object),
    ("json_array", from_json_array),
    ("plain_lines", from_plain_lines),
];

/// Extracts up to `n` suggestions from a completion response.
/// Returns `None` when no attempt recognises the shape or the result is empty.
pub fn parse_suggestions(raw: &str, n: usize) -> Option<Vec<String>> {
    let text = strip_json_fences(raw);
    PARSE_ATTEMPTS
        .iter()
        .find_map(|(name, attempt)| {
            let found = attempt(text, n)?;
            debug!("Parsed {} suggestions as {name}", found.len());
            Some(found)
        })
        .filter(|suggestions| !suggestions.is_empty())
}

/// `{"suggestions": [...]}`
fn from_suggestions_object(text: &str, n: usize) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let suggestions = value.as_object()?.get("suggestions")?;
    Some(
        suggestions
            .as_array()
            .map(|items| collect_entries(items, n))
            .unwrap_or_default(),
    )
}

/// `["...", "..."]`
fn from_json_array(text: &str, n: usize) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    value.as_array().map(|items| collect_entries(items, n))
}

/// Free text, one suggestion per line. Only used when the response is not JSON.
fn from_plain_lines(text: &str, n: usize) -> Option<Vec<String>> {
    if serde_json::from_str::<Value>(text).is_ok() {
        return None;
    }
    Some(
        text.lines()
            .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '-'))
            .filter(|line| !line.is_empty())
            .take(n)
            .map(str::to_string)
            .collect(),
    )
}

/// Accepts plain strings or `{"text": "..."}` objects; anything else is skipped.
fn collect_entries(items: &[Value], n: usize) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(obj) => obj
                .get("text")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .take(n)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback decorator
// ────────────────────────────────────────────────────────────────────────────

pub struct FallbackGenerator {
    primary: Box<dyn SuggestionGenerator>,
    fallback: Box<dyn SuggestionGenerator>,
}

impl FallbackGenerator {
    pub fn new(
        primary: Box<dyn SuggestionGenerator>,
        fallback: Box<dyn SuggestionGenerator>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl SuggestionGenerator for FallbackGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<String>, GenerationError> {
        match self.primary.generate(request).await {
            Ok(suggestions) => Ok(suggestions),
            Err(e) => {
                warn!(
                    "{} generator failed, using {}: {e}",
                    self.primary.label(),
                    self.fallback.label()
                );
                self.fallback.generate(request).await
            }
        }
    }

    fn label(&self) -> &str {
        self.primary.label()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
