//! Text normalizer — redacts sensitive substrings before a bullet is analysed,
//! echoed back, or sent to the completion service.
//!
//! Patterns run in a fixed order. Each placeholder is lowercase and bracketed so
//! no later pattern (and no second pass) can match text an earlier one produced.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! text_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

text_pattern!(RE_EMAIL, r"[\w.\-]+@[\w.\-]+");
text_pattern!(RE_URL, r"\bhttps?://[\w./\-]+\b");
text_pattern!(RE_PHONE, r"\+?\d[\d \-]{6,}\d");
// Two or more capitalized words in a row: likely a client, employer or person.
text_pattern!(RE_PROPER_NOUN_RUN, r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b");
text_pattern!(RE_NUMBER, r"\d[\d,.]*");

pub const EMAIL_PLACEHOLDER: &str = "[redacted_email]";
pub const URL_PLACEHOLDER: &str = "[redacted_url]";
pub const PHONE_PLACEHOLDER: &str = "[redacted_phone]";
pub const COMPANY_PLACEHOLDER: &str = "[redacted_company]";

/// Redaction passes in application order.
static REDACTIONS: &[(&LazyLock<Option<Regex>>, &str)] = &[
    (&RE_EMAIL, EMAIL_PLACEHOLDER),
    (&RE_URL, URL_PLACEHOLDER),
    (&RE_PHONE, PHONE_PLACEHOLDER),
    (&RE_PROPER_NOUN_RUN, COMPANY_PLACEHOLDER),
];

/// Replaces emails, URLs, phone numbers and capitalized name runs with placeholders.
/// Unmatched input passes through unchanged.
///
/// Passes repeat until the text is stable: a placeholder can open a word
/// boundary (`[redacted_phone]https://...`) that an earlier pattern needs.
/// Placeholders never match any pattern, so every round consumes input text.
pub fn anonymize(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let redacted = redact_once(&text);
        if redacted == text {
            return text;
        }
        text = redacted;
    }
}

fn redact_once(raw: &str) -> String {
    let mut text = raw.to_string();
    for &(pattern, placeholder) in REDACTIONS.iter() {
        let Some(re) = pattern.as_ref() else { continue };
        text = re.replace_all(&text, placeholder).into_owned();
    }
    text
}

/// All digit runs (with internal commas/periods) in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<String> {
    match RE_NUMBER.as_ref() {
        Some(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        None => Vec::new(),
    }
}

pub fn has_numbers(text: &str) -> bool {
    RE_NUMBER.as_ref().is_some_and(|re| re.is_match(text))
}

/// Removes every numeric run from `text` and trims the ends.
pub fn strip_numbers(text: &str) -> String {
    match RE_NUMBER.as_ref() {
        Some(re) => re.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}
