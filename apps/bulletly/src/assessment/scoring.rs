//! Variant scoring — ranks rewritten suggestions so the interactive view can
//! point at the strongest one.
//!
//! Score = 5 per strong verb present, -10 per banned word present, plus up to
//! 3 points for brevity (one point lost per ten words).

use crate::assessment::critic::{BANNED_WORDS, STRONG_VERBS};

const STRONG_VERB_POINTS: i32 = 5;
const BANNED_WORD_PENALTY: i32 = 10;
const MAX_BREVITY_POINTS: i32 = 3;
const WORDS_PER_BREVITY_POINT: usize = 10;

pub fn score_variant(text: &str) -> i32 {
    let lowered = text.to_lowercase();

    let verbs = STRONG_VERBS.iter().filter(|v| lowered.contains(*v)).count() as i32;
    let banned = BANNED_WORDS.iter().filter(|b| lowered.contains(*b)).count() as i32;
    let word_tens = (text.split_whitespace().count() / WORDS_PER_BREVITY_POINT) as i32;

    verbs * STRONG_VERB_POINTS - banned * BANNED_WORD_PENALTY
        + (MAX_BREVITY_POINTS - word_tens).max(0)
}

/// Index of the highest-scoring suggestion; the earliest wins a tie.
pub fn pick_best(suggestions: &[String]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (i, s) in suggestions.iter().enumerate() {
        let score = score_variant(s);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}
