//! Human and machine readable renderings of a `BulletFeedback`.

use clap::ValueEnum;

use crate::assessment::scoring::pick_best;
use crate::models::feedback::BulletFeedback;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

pub fn render(feedback: &BulletFeedback, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(feedback)),
        OutputFormat::Markdown => Ok(render_markdown(feedback)),
        OutputFormat::Json => serde_json::to_string_pretty(feedback),
    }
}

fn render_text(feedback: &BulletFeedback) -> String {
    let mut lines = vec![
        format!("Original: {}", feedback.original),
        format!("Verdict: {}", feedback.verdict.as_str()),
        format!("Feedback: {}", feedback.feedback),
        String::new(),
    ];
    if !feedback.clarifying_questions.is_empty() {
        lines.push("Clarifying questions:".to_string());
        lines.extend(feedback.clarifying_questions.iter().map(|q| format!(" - {q}")));
        lines.push(String::new());
    }
    if !feedback.suggestions.is_empty() {
        lines.push("Suggestions:".to_string());
        lines.extend(feedback.suggestions.iter().map(|s| format!(" - {s}")));
    }
    lines.join("\n")
}

fn render_markdown(feedback: &BulletFeedback) -> String {
    let mut lines = vec![
        format!("**Original:** {}", feedback.original),
        String::new(),
        format!("**Verdict:** {}", feedback.verdict.as_str()),
        String::new(),
        format!("**Feedback:** {}", feedback.feedback),
        String::new(),
    ];
    if !feedback.clarifying_questions.is_empty() {
        lines.push("**Clarifying questions:**".to_string());
        lines.extend(feedback.clarifying_questions.iter().map(|q| format!("- {q}")));
        lines.push(String::new());
    }
    if !feedback.suggestions.is_empty() {
        lines.push("**Suggestions:**".to_string());
        // two trailing spaces force a markdown line break
        lines.extend(feedback.suggestions.iter().map(|s| format!("- {s}  ")));
    }
    lines.join("\n")
}

/// Compact rendering used by the interactive loop.
pub fn render_simple(feedback: &BulletFeedback) -> String {
    let mut lines = vec![
        format!("[{}]", feedback.verdict.as_str().to_uppercase()),
        feedback.feedback.clone(),
    ];

    if !feedback.suggestions.is_empty() {
        lines.push(String::new());
        for (i, suggestion) in feedback.suggestions.iter().enumerate() {
            lines.push(format!("{}. {suggestion}", i + 1));
        }
        if feedback.suggestions.len() > 1 {
            if let Some(best) = pick_best(&feedback.suggestions) {
                lines.push(format!("Best pick: #{}", best + 1));
            }
        }
    }

    if !feedback.clarifying_questions.is_empty() {
        lines.push(String::new());
        lines.push("Questions to strengthen:".to_string());
        lines.extend(
            feedback
                .clarifying_questions
                .iter()
                .map(|q| format!("  • {q}")),
        );
    }

    lines.join("\n")
}
