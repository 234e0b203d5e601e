//! Heuristic critic — deterministic checks that decide whether a bullet is
//! ready as-is or needs rewriting.
//!
//! All checks run on the anonymized text and always run together; the verdict
//! is derived from the combined report, never from an early exit.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::feedback::{Verdict, CONCISE_AND_SPECIFIC};

/// Action verbs that count as a strong opening.
pub const STRONG_VERBS: &[&str] = &[
    "created",
    "built",
    "implemented",
    "automated",
    "optimized",
    "reduced",
    "delivered",
    "designed",
    "led",
];

/// Phrases that tie an action to its method or result.
pub const OUTCOME_LINKS: &[&str] = &["by", "with", "leading to", "resulting in", "resulted in"];

/// Buzzwords that force a rewrite regardless of other checks.
pub const BANNED_WORDS: &[&str] = &["synergy", "rockstar", "guru", "world-class"];

/// Asked whenever a bullet lacks a measurable outcome or scope.
pub const CLARIFYING_QUESTIONS: &[&str] = &[
    "What was the measurable outcome (percent/time/dollars)?",
    "What scale or scope did this affect (team/customers/transactions)?",
];

pub const WEAK_VERB: &str = "vague or weak verb";
pub const MISSING_SCOPE: &str = "missing scope or outcome";
pub const LONG_AND_UNFOCUSED: &str = "long and unfocused";

const MIN_TOKENS: usize = 5;
const MAX_CHARS: usize = 200;

static RE_STRONG_VERB: LazyLock<Option<Regex>> = LazyLock::new(|| whole_word_pattern(STRONG_VERBS));
static RE_OUTCOME_LINK: LazyLock<Option<Regex>> = LazyLock::new(|| whole_word_pattern(OUTCOME_LINKS));

fn whole_word_pattern(words: &[&str]) -> Option<Regex> {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).ok()
}

fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Comma-joined list of weaknesses, or `"concise and specific"` when none apply.
pub fn critique(text: &str) -> String {
    let mut reasons = Vec::new();
    if !matches(&RE_STRONG_VERB, text) {
        reasons.push(WEAK_VERB);
    }
    if text.split_whitespace().count() < MIN_TOKENS {
        reasons.push(MISSING_SCOPE);
    }
    if text.chars().count() > MAX_CHARS {
        reasons.push(LONG_AND_UNFOCUSED);
    }

    if reasons.is_empty() {
        CONCISE_AND_SPECIFIC.to_string()
    } else {
        reasons.join(", ")
    }
}

/// True when the critique flags missing scope, or when nothing links the
/// action to an outcome. Either condition alone is enough.
pub fn needs_clarifying_questions(text: &str) -> bool {
    critique(text).contains(MISSING_SCOPE) || !matches(&RE_OUTCOME_LINK, text)
}

/// Banned words found anywhere in `text` (case-insensitive substring match).
pub fn contains_banned_word(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    BANNED_WORDS
        .iter()
        .filter(|w| lowered.contains(*w))
        .map(|w| w.to_string())
        .collect()
}

/// Combined result of every critic check for one bullet.
#[derive(Debug, Clone, PartialEq)]
pub struct CritiqueReport {
    pub critique: String,
    pub clarifying_questions: Vec<String>,
    pub banned_words: Vec<String>,
}

impl CritiqueReport {
    pub fn verdict(&self) -> Verdict {
        if self.critique == CONCISE_AND_SPECIFIC
            && self.clarifying_questions.is_empty()
            && self.banned_words.is_empty()
        {
            Verdict::Good
        } else {
            Verdict::NeedsImprovement
        }
    }

    /// Human-readable summary stored on the feedback record.
    pub fn summary(&self) -> String {
        match self.verdict() {
            Verdict::Good => CONCISE_AND_SPECIFIC.to_string(),
            Verdict::NeedsImprovement if !self.banned_words.is_empty() => {
                format!("{}; contains banned words", self.critique)
            }
            Verdict::NeedsImprovement => self.critique.clone(),
        }
    }
}

/// Runs all checks on an anonymized bullet.
pub fn review(text: &str) -> CritiqueReport {
    let critique = critique(text);
    let clarifying_questions = if needs_clarifying_questions(text) {
        CLARIFYING_QUESTIONS.iter().map(|q| q.to_string()).collect()
    } else {
        Vec::new()
    };
    let banned_words = contains_banned_word(text);

    CritiqueReport {
        critique,
        clarifying_questions,
        banned_words,
    }
}
