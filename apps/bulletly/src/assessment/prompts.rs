// All LLM prompt text for bullet rewriting.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::assessment::suggestions::SuggestionRequest;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_INVENTION_INSTRUCTION};
use crate::llm_client::ChatMessage;

/// Role statement for the rewriting system prompt.
pub const REWRITE_SYSTEM_ROLE: &str = "You are a resume bullet rewriting expert.";

/// Writing rules for the rewriting system prompt.
pub const REWRITE_SYSTEM_RULES: &str = "Keep tense consistent, start with strong verbs, \
    include scope and technology when appropriate, and optimize for ATS clarity.";

/// User prompt template. Replace: {bullet}, {role}, {seniority}, {style}, {tone},
/// {metrics_rule}, {n}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Bullet: {bullet}
Role: {role}
Seniority: {seniority}
Style: {style}
Tone: {tone}
Rule: {metrics_rule}.
Constraints: Return a JSON object of the form {"suggestions": ["...", "..."]}.
Limit each suggestion to <= 2 lines; produce exactly {n} suggestions."#;

pub const KEEP_METRICS_RULE: &str = "strictly preserve any numbers exactly";
pub const NO_NEW_NUMBERS_RULE: &str = "do not invent numbers";

pub fn rewrite_system_prompt() -> String {
    format!("{REWRITE_SYSTEM_ROLE} {NO_INVENTION_INSTRUCTION} {REWRITE_SYSTEM_RULES} {JSON_ONLY_INSTRUCTION}")
}

pub fn build_rewrite_prompt(request: &SuggestionRequest<'_>) -> String {
    let metrics_rule = if request.keep_metrics {
        KEEP_METRICS_RULE
    } else {
        NO_NEW_NUMBERS_RULE
    };

    let n = request.n.to_string();
    fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("bullet", request.text),
            ("role", request.role),
            ("seniority", request.seniority),
            ("style", request.style.as_str()),
            ("tone", request.tone.as_str()),
            ("metrics_rule", metrics_rule),
            ("n", &n),
        ],
    )
}

/// Fills `{name}` placeholders in one left-to-right pass; substituted values
/// are never rescanned. Unknown `{...}` spans are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let value = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// System + user messages for one rewrite request.
pub fn build_rewrite_messages(request: &SuggestionRequest<'_>) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(rewrite_system_prompt()),
        ChatMessage::user(build_rewrite_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::styles::{Style, Tone};
    use crate::llm_client::ChatRole;

    fn request(keep_metrics: bool) -> SuggestionRequest<'static> {
        SuggestionRequest {
            text: "Built API for ingestion",
            role: "Data Engineer",
            seniority: "Senior",
            style: Style::Tech,
            tone: Tone::Bold,
            keep_metrics,
            n: 3,
        }
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let prompt = build_rewrite_prompt(&request(false));
        assert!(prompt.contains("Bullet: Built API for ingestion"));
        assert!(prompt.contains("Role: Data Engineer"));
        assert!(prompt.contains("Seniority: Senior"));
        assert!(prompt.contains("Style: tech"));
        assert!(prompt.contains("Tone: bold"));
        assert!(prompt.contains("Rule: do not invent numbers."));
        assert!(prompt.contains("produce exactly 3 suggestions"));
        assert!(!prompt.contains("{n}"));
        assert!(!prompt.contains("{bullet}"));
    }

    #[test]
    fn test_bullet_text_is_not_rescanned() {
        let mut req = request(false);
        req.text = "Documented the {role} field";
        assert!(build_rewrite_prompt(&req).contains("Bullet: Documented the {role} field"));
    }

    #[test]
    fn test_role_and_seniority_are_not_rescanned() {
        let mut req = request(false);
        req.role = "Engineer {n} {bullet}";
        req.seniority = "{style}";
        let prompt = build_rewrite_prompt(&req);
        assert!(prompt.contains("Role: Engineer {n} {bullet}"));
        assert!(prompt.contains("Seniority: {style}"));
        assert!(prompt.contains("Style: tech"));
        assert!(prompt.contains("produce exactly 3 suggestions"));
    }

    #[test]
    fn test_json_braces_in_template_survive() {
        let prompt = build_rewrite_prompt(&request(false));
        assert!(prompt.contains(r#"{"suggestions": ["...", "..."]}"#));
    }

    #[test]
    fn test_keep_metrics_rule() {
        let prompt = build_rewrite_prompt(&request(true));
        assert!(prompt.contains(KEEP_METRICS_RULE));
    }

    #[test]
    fn test_system_prompt_forbids_invented_metrics() {
        let system = rewrite_system_prompt();
        assert!(system.contains("Do not invent metrics"));
        assert!(system.contains("strong verbs"));
        assert!(system.contains("valid JSON only"));
    }

    #[test]
    fn test_messages_are_system_then_user() {
        let messages = build_rewrite_messages(&request(false));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
    }
}
