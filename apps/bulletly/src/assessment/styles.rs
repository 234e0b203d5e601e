//! Rewrite styles and tones — maps a requested style to the opening verbs the
//! offline templates cycle through.
//!
//! Style and tone arrive as free text from HTTP callers, so both have a lenient
//! `from_name` that falls back to the default instead of failing.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Ats,
    Impact,
    Tech,
    Leadership,
    Concise,
}

impl Style {
    /// Parses a style name case-insensitively. Unknown names map to `Ats`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "impact" => Style::Impact,
            "tech" => Style::Tech,
            "leadership" => Style::Leadership,
            "concise" => Style::Concise,
            _ => Style::Ats,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Ats => "ats",
            Style::Impact => "impact",
            Style::Tech => "tech",
            Style::Leadership => "leadership",
            Style::Concise => "concise",
        }
    }

    /// Opening verbs for offline suggestions, cycled by suggestion index.
    pub fn verbs(&self) -> &'static [&'static str] {
        match self {
            Style::Ats => &["Improved", "Streamlined", "Managed"],
            Style::Impact => &["Reduced", "Increased", "Accelerated"],
            Style::Tech => &["Implemented", "Designed", "Built"],
            Style::Leadership => &["Led", "Mentored", "Aligned"],
            Style::Concise => &["Built", "Ran", "Scaled"],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Confident,
    Bold,
}

impl Tone {
    /// Parses a tone name case-insensitively. Unknown names map to `Neutral`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "confident" => Tone::Confident,
            "bold" => Tone::Bold,
            _ => Tone::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Confident => "confident",
            Tone::Bold => "bold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_three_verbs() {
        for style in Style::value_variants() {
            assert_eq!(style.verbs().len(), 3, "style {:?}", style);
        }
    }

    #[test]
    fn test_leadership_verbs() {
        assert_eq!(Style::Leadership.verbs(), &["Led", "Mentored", "Aligned"]);
    }

    #[test]
    fn test_unknown_style_falls_back_to_ats() {
        assert_eq!(Style::from_name("storytelling"), Style::Ats);
        assert_eq!(Style::from_name(""), Style::Ats);
    }

    #[test]
    fn test_style_name_is_case_insensitive() {
        assert_eq!(Style::from_name("  Impact "), Style::Impact);
        assert_eq!(Style::from_name("TECH"), Style::Tech);
    }

    #[test]
    fn test_style_names_round_trip() {
        for style in Style::value_variants() {
            assert_eq!(Style::from_name(style.as_str()), *style);
        }
    }

    #[test]
    fn test_unknown_tone_falls_back_to_neutral() {
        assert_eq!(Tone::from_name("sarcastic"), Tone::Neutral);
        assert_eq!(Tone::from_name("Bold"), Tone::Bold);
    }

    #[test]
    fn test_style_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Style::Leadership).unwrap(), "\"leadership\"");
        assert_eq!(serde_json::to_string(&Tone::Confident).unwrap(), "\"confident\"");
    }
}
