//! Numeric policy — suggestions may neither invent numbers the bullet never
//! had, nor (with keep-metrics) drop the ones it did.

use crate::assessment::normalizer::{extract_numbers, strip_numbers};

/// Applies the numeric policy to generated suggestions.
///
/// - keep-metrics and the bullet had numbers: when no suggestion carries a digit,
///   the bullet's numbers are appended to the first suggestion as `(a, b)`.
/// - the bullet had no numbers: every numeric run is removed from every
///   suggestion, whatever `keep_metrics` says.
///
/// `original_text` is the anonymized bullet; `original_has_numbers` is computed
/// on the raw input.
pub fn enforce(
    mut suggestions: Vec<String>,
    original_text: &str,
    keep_metrics: bool,
    original_has_numbers: bool,
) -> Vec<String> {
    if keep_metrics && original_has_numbers {
        let any_digit = suggestions
            .iter()
            .any(|s| s.chars().any(|c| c.is_ascii_digit()));
        let numbers = extract_numbers(original_text);
        if !any_digit && !numbers.is_empty() {
            if let Some(first) = suggestions.first_mut() {
                first.push_str(&format!(" ({})", numbers.join(", ")));
            }
        }
        suggestions
    } else if !original_has_numbers {
        suggestions.iter().map(|s| strip_numbers(s)).collect()
    } else {
        suggestions
    }
}
